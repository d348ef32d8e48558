//! Biquad Filter Implementation (IIR 2nd Order)
//!
//! A second-order recursive filter section, the building block of the cut
//! filter cascade. Coefficients live in a separate value type so cascade
//! stages can swap in freshly designed blocks without touching delay state.
//!
//! # Design Notes
//! - Optimized for real-time audio processing with minimal CPU overhead
//! - Coefficient updates preserve delay state to avoid clicks on automation
//! - All operations are safe for the audio thread (no allocations)

use std::f32::consts::PI;

/// Coefficients for one biquad section, normalized by the leading
/// denominator coefficient `a0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f32,
    pub b1: f32,
    pub b2: f32,
    pub a1: f32,
    pub a2: f32,
}

impl BiquadCoeffs {
    /// Pass-through section.
    pub const IDENTITY: BiquadCoeffs = BiquadCoeffs {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// RBJ cookbook low-pass section.
    pub fn lowpass(cutoff: f32, q: f32, sample_rate: f32) -> Self {
        let w0 = 2.0 * PI * cutoff / sample_rate;
        let alpha = w0.sin() / (2.0 * q.max(1e-6));
        let cw0 = w0.cos();

        let a0 = 1.0 + alpha;
        let inv_a0 = 1.0 / a0;

        Self {
            b0: ((1.0 - cw0) * 0.5) * inv_a0,
            b1: (1.0 - cw0) * inv_a0,
            b2: ((1.0 - cw0) * 0.5) * inv_a0,
            a1: (-2.0 * cw0) * inv_a0,
            a2: (1.0 - alpha) * inv_a0,
        }
    }
}

impl Default for BiquadCoeffs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Biquad filter section (transposed direct form II).
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    coeffs: BiquadCoeffs,
    z1: f32,
    z2: f32,
}

impl Biquad {
    pub fn new() -> Self {
        Self {
            coeffs: BiquadCoeffs::IDENTITY,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Process a single sample
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let c = &self.coeffs;
        let out = input * c.b0 + self.z1;

        // Anti-denormal: tiny DC offset
        self.z1 = input * c.b1 + self.z2 - c.a1 * out + 1e-25;
        self.z2 = input * c.b2 - c.a2 * out + 1e-25;

        out
    }

    /// Swap in a new coefficient block.
    ///
    /// IMPORTANT: delay state is intentionally kept, so coefficients can be
    /// updated every block while audio is running.
    #[inline]
    pub fn set_coeffs(&mut self, coeffs: BiquadCoeffs) {
        self.coeffs = coeffs;
    }

    pub fn coeffs(&self) -> BiquadCoeffs {
        self.coeffs
    }

    /// Clear filter delay state. Use at stream start or on host reset.
    #[inline]
    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}
