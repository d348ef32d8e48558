pub mod biquad;
pub mod butterworth;
pub mod cascade;

pub use biquad::{Biquad, BiquadCoeffs};
pub use butterworth::{design_lowpass, CoeffBlocks};
pub use cascade::{CutFilter, Slope};

/// Magnitude response of a biquad chain at one frequency, in dB.
#[cfg(test)]
pub(crate) fn magnitude_db(sections: &[BiquadCoeffs], freq: f32, sample_rate: f32) -> f32 {
    use std::f64::consts::TAU;

    let w = TAU * freq as f64 / sample_rate as f64;
    let (cos1, sin1) = (w.cos(), -w.sin());
    let (cos2, sin2) = ((2.0 * w).cos(), -(2.0 * w).sin());

    let mut gain = 1.0f64;
    for c in sections {
        let (b0, b1, b2) = (c.b0 as f64, c.b1 as f64, c.b2 as f64);
        let (a1, a2) = (c.a1 as f64, c.a2 as f64);

        // H(e^jw) with z^-1 = cos(w) - j sin(w)
        let num_re = b0 + b1 * cos1 + b2 * cos2;
        let num_im = b1 * sin1 + b2 * sin2;
        let den_re = 1.0 + a1 * cos1 + a2 * cos2;
        let den_im = a1 * sin1 + a2 * sin2;

        gain *= ((num_re * num_re + num_im * num_im)
            / (den_re * den_re + den_im * den_im))
            .sqrt();
    }
    20.0 * gain.log10() as f32
}
