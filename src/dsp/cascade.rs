//! The per-channel cut filter: a fixed two-stage biquad cascade.
//!
//! One `CutFilter` exists per audio channel. Stages hold a swappable
//! coefficient block and a bypass flag; which stages are active is decided
//! entirely by the selected slope. Coefficient updates happen every block
//! while the delay lines keep running, so cutoff automation stays click-free.

use nih_plug::prelude::Enum;

use super::biquad::{Biquad, BiquadCoeffs};
use super::butterworth::CoeffBlocks;

/// Roll-off steepness of the cut filter.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slope {
    #[name = "12 dB/Oct"]
    Db12,
    #[name = "24 dB/Oct"]
    Db24,
}

impl Slope {
    /// Butterworth order realizing this slope.
    pub fn order(self) -> usize {
        match self {
            Slope::Db12 => 2,
            Slope::Db24 => 4,
        }
    }

    /// Stages that must be active for this slope, paired index-for-index
    /// with the designed coefficient blocks. Stage 0 is active for every
    /// slope; stage 1 joins in only at 24 dB/Oct.
    pub fn active_stages(self) -> &'static [usize] {
        match self {
            Slope::Db12 => &[0],
            Slope::Db24 => &[0, 1],
        }
    }
}

const NUM_STAGES: usize = 2;

#[derive(Debug, Clone, Copy)]
struct Stage {
    filter: Biquad,
    bypassed: bool,
}

impl Stage {
    fn new() -> Self {
        Self {
            filter: Biquad::new(),
            bypassed: true,
        }
    }
}

/// Two-stage biquad cascade for one channel.
#[derive(Debug, Clone, Copy)]
pub struct CutFilter {
    stages: [Stage; NUM_STAGES],
}

impl CutFilter {
    pub fn new() -> Self {
        Self {
            stages: [Stage::new(); NUM_STAGES],
        }
    }

    /// Installs a fresh set of coefficient blocks for the given slope.
    ///
    /// Both stages are bypassed first, then each stage named by
    /// `slope.active_stages()` receives its block and is switched back on.
    /// Delay state is never cleared here.
    pub fn apply(&mut self, blocks: &CoeffBlocks, slope: Slope) {
        debug_assert_eq!(blocks.len(), slope.active_stages().len());

        for stage in &mut self.stages {
            stage.bypassed = true;
        }
        for &idx in slope.active_stages() {
            self.stages[idx].filter.set_coeffs(blocks.as_slice()[idx]);
            self.stages[idx].bypassed = false;
        }
    }

    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        let mut out = input;
        for stage in &mut self.stages {
            if !stage.bypassed {
                out = stage.filter.process(out);
            }
        }
        out
    }

    /// Filters a channel buffer in place.
    pub fn process(&mut self, samples: &mut [f32]) {
        for sample in samples {
            *sample = self.process_sample(*sample);
        }
    }

    /// Clear all delay state, leaving coefficients and bypass flags alone.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.filter.reset();
        }
    }

    pub fn num_active_stages(&self) -> usize {
        self.stages.iter().filter(|s| !s.bypassed).count()
    }

    pub fn stage_is_active(&self, idx: usize) -> bool {
        !self.stages[idx].bypassed
    }

    pub fn stage_coeffs(&self, idx: usize) -> BiquadCoeffs {
        self.stages[idx].filter.coeffs()
    }
}

impl Default for CutFilter {
    fn default() -> Self {
        Self::new()
    }
}
