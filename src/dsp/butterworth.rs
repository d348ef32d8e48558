//! Butterworth low-pass design for the cut filter cascade.
//!
//! An even-order Butterworth low-pass factors into `order / 2` second-order
//! sections sharing the cutoff frequency, with per-section Q taken from the
//! Butterworth pole angles. The design runs once per audio block and returns
//! its sections by value, so it never allocates.

use std::f32::consts::PI;

use super::biquad::BiquadCoeffs;

/// Highest supported section count (order 4 = two sections).
pub const MAX_SECTIONS: usize = 2;

/// The coefficient blocks produced by one design pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoeffBlocks {
    blocks: [BiquadCoeffs; MAX_SECTIONS],
    len: usize,
}

impl CoeffBlocks {
    pub fn as_slice(&self) -> &[BiquadCoeffs] {
        &self.blocks[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Per-section Q for an even-order Butterworth filter.
///
/// Pole angles: theta_k = PI * (2k + order - 1) / (2 * order), k = 1..order/2.
/// Each conjugate pole pair maps to a section with Q = -1 / (2 cos theta_k).
fn section_q(order: usize, section: usize) -> f32 {
    let k = section + 1;
    let theta = PI * (2 * k + order - 1) as f32 / (2 * order) as f32;
    -1.0 / (2.0 * theta.cos())
}

/// Designs an even-order Butterworth low-pass as a chain of biquad sections.
///
/// `order` must be even and no greater than `2 * MAX_SECTIONS`. The cutoff is
/// clamped below Nyquist; the parameter range already keeps it within
/// [20, 20000] Hz.
pub fn design_lowpass(cutoff: f32, sample_rate: f32, order: usize) -> CoeffBlocks {
    debug_assert!(order >= 2 && order % 2 == 0 && order / 2 <= MAX_SECTIONS);

    let cutoff = cutoff.clamp(1.0, sample_rate * 0.49);
    let sections = order / 2;

    let mut blocks = [BiquadCoeffs::IDENTITY; MAX_SECTIONS];
    for (section, block) in blocks.iter_mut().enumerate().take(sections) {
        *block = BiquadCoeffs::lowpass(cutoff, section_q(order, section), sample_rate);
    }

    CoeffBlocks {
        blocks,
        len: sections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::magnitude_db;

    #[test]
    fn block_count_follows_order() {
        assert_eq!(design_lowpass(1000.0, 48000.0, 2).len(), 1);
        assert_eq!(design_lowpass(1000.0, 48000.0, 4).len(), 2);
    }

    #[test]
    fn section_qs_match_pole_angles() {
        assert!((section_q(2, 0) - 0.70710677).abs() < 1e-5);
        assert!((section_q(4, 0) - 1.3065630).abs() < 1e-5);
        assert!((section_q(4, 1) - 0.54119610).abs() < 1e-5);
    }

    #[test]
    fn design_is_deterministic() {
        let a = design_lowpass(632.5, 44100.0, 4);
        let b = design_lowpass(632.5, 44100.0, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn cutoff_sits_three_db_down() {
        // Maximally flat response: -3.01 dB at the cutoff for any order
        for &order in &[2usize, 4] {
            let blocks = design_lowpass(1000.0, 48000.0, order);
            let db = magnitude_db(blocks.as_slice(), 1000.0, 48000.0);
            assert!(
                (db + 3.01).abs() < 0.1,
                "order {} cutoff gain: {} dB",
                order,
                db
            );
        }
    }

    #[test]
    fn passband_is_flat() {
        let blocks = design_lowpass(2000.0, 48000.0, 4);
        for &f in &[50.0, 100.0, 200.0, 400.0] {
            let db = magnitude_db(blocks.as_slice(), f, 48000.0);
            assert!(db.abs() < 0.1, "{} Hz gain: {} dB", f, db);
        }
    }

    #[test]
    fn cutoff_is_clamped_below_nyquist() {
        // Would be unstable unclamped; must still produce finite coefficients
        let blocks = design_lowpass(30000.0, 44100.0, 2);
        for c in blocks.as_slice() {
            for v in [c.b0, c.b1, c.b2, c.a1, c.a2] {
                assert!(v.is_finite());
            }
        }
    }
}
