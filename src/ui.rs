//! SimplePass editor: a cutoff slider and a slope toggle on a light panel.

use crate::dsp::Slope;
use crate::PassParams;
use nih_plug::nih_error;
use nih_plug::prelude::{GuiContext, ParamSetter};
use nih_plug_vizia::vizia::prelude::*;
use nih_plug_vizia::widgets::*;
use std::sync::Arc;

// --- CSS STYLING ---
const STYLE: &str = r#"
    .app-root {
        background-color: #ffffff;
        color: #0f172a;
        child-space: 1s;
        row-between: 18px;
    }

    .header {
        child-space: 1s;
        row-between: 2px;
    }

    .header-title {
        font-size: 26px;
        font-weight: bold;
        color: #0f172a;
    }

    .header-sub {
        font-size: 12px;
        color: #64748b;
    }

    .section-label {
        font-size: 11px;
        font-weight: bold;
        text-transform: uppercase;
        letter-spacing: 1px;
        color: #64748b;
    }

    .freq-slider {
        width: 220px;
        height: 28px;
        background-color: #e1e6eb;
        border: 1px solid #e6e6e6;
        border-radius: 6px;
        color: #0f172a;
    }

    .slope-group {
        child-space: 1s;
        col-between: 8px;
    }

    .slope-button {
        width: 110px;
        height: 36px;
        background-color: #ffffff;
        border: 1px solid #cbd5e1;
        border-radius: 6px;
        color: #0f172a;
        font-size: 12px;
        child-space: 1s;
    }

    .slope-button-active {
        width: 110px;
        height: 36px;
        background-color: #00008b;
        border: 1px solid #00008b;
        border-radius: 6px;
        color: #ffffff;
        font-size: 12px;
        child-space: 1s;
    }
"#;

#[derive(Lens, Clone)]
pub struct Data {
    pub params: Arc<PassParams>,
}

impl Model for Data {}

/// Single write path for UI-driven slope changes, guarded by the host's
/// begin/end notification pair.
fn set_slope(params: &Arc<PassParams>, gui_context: &Arc<dyn GuiContext>, slope: Slope) {
    let setter = ParamSetter::new(gui_context.as_ref());
    setter.begin_set_parameter(&params.slope);
    setter.set_parameter(&params.slope, slope);
    setter.end_set_parameter(&params.slope);
}

fn slope_button<'a>(
    cx: &'a mut Context,
    label: &'static str,
    is_active: bool,
    callback: impl Fn(&mut EventContext) + 'static,
) -> Handle<'a, Button> {
    Button::new(cx, callback, |cx| Label::new(cx, label)).class(if is_active {
        "slope-button-active"
    } else {
        "slope-button"
    })
}

pub fn build_ui(cx: &mut Context, params: Arc<PassParams>, gui_context: Arc<dyn GuiContext>) {
    if cx.add_stylesheet(STYLE).is_err() {
        nih_error!("failed to load the SimplePass stylesheet");
    }

    Data {
        params: params.clone(),
    }
    .build(cx);

    VStack::new(cx, move |cx| {
        // HEADER
        VStack::new(cx, |cx| {
            Label::new(cx, "SimplePass").class("header-title");
            Label::new(cx, "Low-Pass Filter").class("header-sub");
        })
        .class("header");

        // CUTOFF
        Label::new(cx, "Cutoff").class("section-label");
        ParamSlider::new(cx, Data::params, |p| &p.freq).class("freq-slider");

        // SLOPE
        Label::new(cx, "Slope").class("section-label");
        Binding::new(
            cx,
            Data::params.map(|p| p.slope.value() == Slope::Db24),
            move |cx, lens| {
                let steep = lens.get(cx);

                // Clone inside Binding so the captured Arcs survive rebuilds
                let params_local = params.clone();
                let gui_local = gui_context.clone();

                HStack::new(cx, move |cx| {
                    let p1 = params_local.clone();
                    let g1 = gui_local.clone();
                    slope_button(cx, "12 dB/Oct", !steep, move |_| {
                        set_slope(&p1, &g1, Slope::Db12)
                    });

                    let p2 = params_local.clone();
                    let g2 = gui_local.clone();
                    slope_button(cx, "24 dB/Oct", steep, move |_| {
                        set_slope(&p2, &g2, Slope::Db24)
                    });
                })
                .class("slope-group");
            },
        );
    })
    .class("app-root");
}
