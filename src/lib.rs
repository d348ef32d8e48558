pub mod dsp;
mod ui;

use crate::dsp::{butterworth, CutFilter, Slope};
use nih_plug::prelude::*;
use nih_plug_vizia::{create_vizia_editor, ViziaState, ViziaTheming};
use std::sync::Arc;
use ui::build_ui;

const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// Number of cut filter chains; channels past this are passed through
/// untouched (and there are none in the supported layouts).
const NUM_CHAINS: usize = 2;

// -----------------------------------------------------------------------------
// PARAMETERS
// -----------------------------------------------------------------------------
#[derive(Params)]
pub struct PassParams {
    #[id = "Freq"]
    pub freq: FloatParam,

    #[id = "Slope"]
    pub slope: EnumParam<Slope>,
}

// Helper to format the cutoff as "440 Hz" for the DAW display
fn format_hz(v: f32) -> String {
    format!("{:.0} Hz", v)
}

impl Default for PassParams {
    fn default() -> Self {
        Self {
            freq: FloatParam::new(
                "Freq",
                20000.0,
                FloatRange::Skewed {
                    min: 20.0,
                    max: 20000.0,
                    // Skewed toward low frequencies, where cutoff resolution matters
                    factor: FloatRange::skew_factor(-2.0),
                },
            )
            .with_step_size(1.0)
            .with_value_to_string(Arc::new(format_hz)),

            slope: EnumParam::new("Slope", Slope::Db12),
        }
    }
}

/// Snapshot of the automatable parameters, taken once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainSettings {
    pub freq: f32,
    pub slope: Slope,
}

impl ChainSettings {
    pub fn read(params: &PassParams) -> Self {
        Self {
            freq: params.freq.value(),
            slope: params.slope.value(),
        }
    }
}

// -----------------------------------------------------------------------------
// PLUGIN STRUCT
// -----------------------------------------------------------------------------
pub struct SimplePass {
    params: Arc<PassParams>,
    editor_state: Arc<ViziaState>,
    sample_rate: f32,
    num_output_channels: usize,
    chain_l: CutFilter,
    chain_r: CutFilter,
}

impl Default for SimplePass {
    fn default() -> Self {
        Self {
            params: Arc::new(PassParams::default()),
            editor_state: ViziaState::new(|| (400, 300)),
            sample_rate: DEFAULT_SAMPLE_RATE,
            num_output_channels: NUM_CHAINS,
            chain_l: CutFilter::new(),
            chain_r: CutFilter::new(),
        }
    }
}

impl SimplePass {
    /// Redesigns the Butterworth blocks for the current settings and installs
    /// them into both channel cascades. No other side effects.
    fn update_filters(&mut self, settings: ChainSettings) {
        let blocks =
            butterworth::design_lowpass(settings.freq, self.sample_rate, settings.slope.order());
        self.chain_l.apply(&blocks, settings.slope);
        self.chain_r.apply(&blocks, settings.slope);
    }
}

/// Filters the first `num_outputs` channels in place (left then right) and
/// clears any buffer channels beyond the declared output count.
fn process_block(
    channels: &mut [&mut [f32]],
    num_outputs: usize,
    left: &mut CutFilter,
    right: &mut CutFilter,
) {
    for channel in channels.iter_mut().skip(num_outputs) {
        channel.fill(0.0);
    }

    let mut chains = [left, right].into_iter();
    for channel in channels.iter_mut().take(num_outputs.min(NUM_CHAINS)) {
        if let Some(chain) = chains.next() {
            chain.process(channel);
        }
    }
}

impl Plugin for SimplePass {
    const NAME: &'static str = "SimplePass";
    const VENDOR: &'static str = "SimplePass Audio";
    const URL: &'static str = "";
    const EMAIL: &'static str = "";
    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // Mono and stereo only, with matching input and output layouts; the host
    // wrapper rejects anything not listed here.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = &[
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(2),
            main_output_channels: NonZeroU32::new(2),
            ..AudioIOLayout::const_default()
        },
        AudioIOLayout {
            main_input_channels: NonZeroU32::new(1),
            main_output_channels: NonZeroU32::new(1),
            ..AudioIOLayout::const_default()
        },
    ];

    const MIDI_INPUT: MidiConfig = MidiConfig::None;
    const SAMPLE_ACCURATE_AUTOMATION: bool = true;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        self.sample_rate = buffer_config.sample_rate;
        self.num_output_channels = audio_io_layout
            .main_output_channels
            .map(NonZeroU32::get)
            .unwrap_or(0) as usize;

        self.chain_l.reset();
        self.chain_r.reset();

        // Make the cascades valid before the first block arrives
        let settings = ChainSettings::read(&self.params);
        self.update_filters(settings);

        nih_log!(
            "initialized: {} Hz, {} output channel(s)",
            self.sample_rate,
            self.num_output_channels
        );

        true
    }

    fn editor(&mut self, _async_executor: AsyncExecutor<Self>) -> Option<Box<dyn Editor>> {
        let params = self.params.clone();
        create_vizia_editor(
            self.editor_state.clone(),
            ViziaTheming::default(),
            move |cx, gui_context| {
                build_ui(cx, params.clone(), gui_context);
            },
        )
    }

    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        let settings = ChainSettings::read(&self.params);
        self.update_filters(settings);

        process_block(
            buffer.as_slice(),
            self.num_output_channels,
            &mut self.chain_l,
            &mut self.chain_r,
        );

        ProcessStatus::Normal
    }

    fn reset(&mut self) {
        self.chain_l.reset();
        self.chain_r.reset();
    }
}

impl ClapPlugin for SimplePass {
    const CLAP_ID: &'static str = "com.simplepass.lowpass";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("Cascaded Butterworth low-pass filter");
    const CLAP_MANUAL_URL: Option<&'static str> = None;
    const CLAP_SUPPORT_URL: Option<&'static str> = None;
    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Filter,
        ClapFeature::Stereo,
        ClapFeature::Mono,
    ];
}

impl Vst3Plugin for SimplePass {
    const VST3_CLASS_ID: [u8; 16] = *b"SimplePassLoPass";
    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Filter];
}

nih_export_clap!(SimplePass);
nih_export_vst3!(SimplePass);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_wide_open() {
        let params = PassParams::default();
        let settings = ChainSettings::read(&params);
        assert_eq!(settings.freq, 20000.0);
        assert_eq!(settings.slope, Slope::Db12);
    }

    #[test]
    fn layouts_are_mono_or_stereo_with_matching_io() {
        let mut widths = Vec::new();
        for layout in SimplePass::AUDIO_IO_LAYOUTS {
            let ins = layout.main_input_channels.map(NonZeroU32::get).unwrap_or(0);
            let outs = layout
                .main_output_channels
                .map(NonZeroU32::get)
                .unwrap_or(0);
            assert_eq!(ins, outs, "effect layouts must have matching input/output");
            assert!((1..=2).contains(&outs), "only mono and stereo are offered");
            widths.push(outs);
        }
        assert!(widths.contains(&1));
        assert!(widths.contains(&2));
        assert!(!widths.contains(&4));
    }

    #[test]
    fn update_filters_configures_both_chains_identically() {
        let mut plugin = SimplePass::default();
        plugin.sample_rate = 48000.0;
        plugin.update_filters(ChainSettings {
            freq: 750.0,
            slope: Slope::Db24,
        });

        assert_eq!(plugin.chain_l.num_active_stages(), 2);
        assert_eq!(plugin.chain_r.num_active_stages(), 2);
        assert_eq!(plugin.chain_l.stage_coeffs(0), plugin.chain_r.stage_coeffs(0));
        assert_eq!(plugin.chain_l.stage_coeffs(1), plugin.chain_r.stage_coeffs(1));
    }

    #[test]
    fn channels_past_declared_outputs_are_cleared() {
        let mut plugin = SimplePass::default();
        plugin.sample_rate = 48000.0;
        plugin.update_filters(ChainSettings {
            freq: 1000.0,
            slope: Slope::Db12,
        });

        let mut data: Vec<Vec<f32>> = (0..4).map(|_| vec![0.5; 64]).collect();
        let mut channels: Vec<&mut [f32]> =
            data.iter_mut().map(|c| c.as_mut_slice()).collect();
        process_block(&mut channels, 2, &mut plugin.chain_l, &mut plugin.chain_r);
        drop(channels);

        assert!(data[2].iter().all(|&s| s == 0.0));
        assert!(data[3].iter().all(|&s| s == 0.0));
        // The filtered channels carry signal
        assert!(data[0].iter().any(|&s| s != 0.0));
        assert!(data[1].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn identical_chains_filter_both_channels_identically() {
        let mut plugin = SimplePass::default();
        plugin.sample_rate = 48000.0;
        plugin.update_filters(ChainSettings {
            freq: 2000.0,
            slope: Slope::Db24,
        });

        let input: Vec<f32> = (0..256).map(|n| ((n % 17) as f32 / 8.5) - 1.0).collect();
        let mut data = vec![input.clone(), input];
        let mut channels: Vec<&mut [f32]> =
            data.iter_mut().map(|c| c.as_mut_slice()).collect();
        process_block(&mut channels, 2, &mut plugin.chain_l, &mut plugin.chain_r);
        drop(channels);

        assert_eq!(data[0], data[1]);
    }

    #[test]
    fn mono_layout_uses_the_left_chain_only() {
        let mut plugin = SimplePass::default();
        plugin.sample_rate = 48000.0;
        plugin.update_filters(ChainSettings {
            freq: 1000.0,
            slope: Slope::Db12,
        });

        let mut data = vec![vec![1.0f32; 32]];
        let mut channels: Vec<&mut [f32]> =
            data.iter_mut().map(|c| c.as_mut_slice()).collect();
        process_block(&mut channels, 1, &mut plugin.chain_l, &mut plugin.chain_r);
        drop(channels);

        assert!(data[0].iter().any(|&s| s != 1.0));
        // Right chain never saw a sample, its delay state stays silent
        assert_eq!(plugin.chain_r.process_sample(0.0), 0.0);
    }
}
