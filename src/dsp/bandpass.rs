use std::f64::consts::PI;

use num_complex::Complex64;

use crate::constants::{MAX_NORMALIZED_FREQ, MIN_CENTER_GAIN, MIN_NORMALIZED_FREQ};
use crate::dsp::{Filter, FirDelayLine};
use crate::error::{FskError, Result};

/// FIR band-pass filter tuned to one FSK tone
///
/// Coefficients come from a windowed-sinc design: the difference of two
/// low-pass sinc kernels at the band edges, shaped by a Hamming window for
/// sidelobe suppression, then scaled for unity gain at the band center.
/// Linear phase, so both quadrature components see the same group delay.
pub struct FirBandpass {
    core: FirDelayLine,
}

impl FirBandpass {
    /// Create a new FIR band-pass filter
    ///
    /// # Arguments
    /// * `low_hz` - Lower pass-band edge in Hz
    /// * `high_hz` - Upper pass-band edge in Hz
    /// * `sample_rate` - Sample rate in Hz
    /// * `num_taps` - Filter length (rounded up to odd for Type I linear phase)
    ///
    /// # Errors
    /// Returns `FskError::FilterDesign` if the band is degenerate.
    pub fn new(low_hz: f32, high_hz: f32, sample_rate: f32, num_taps: usize) -> Result<Self> {
        let num_taps = if num_taps.is_multiple_of(2) {
            num_taps + 1
        } else {
            num_taps
        };

        let taps = design_bandpass(low_hz, high_hz, sample_rate, num_taps)?;
        Ok(Self {
            core: FirDelayLine::new(taps),
        })
    }

    /// Process a single sample through the filter
    pub fn process(&mut self, sample: f32) -> f32 {
        self.core.process(sample)
    }

    /// Get the number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.core.num_taps()
    }

    #[cfg(test)]
    fn taps(&self) -> &[f64] {
        self.core.taps()
    }
}

impl Filter for FirBandpass {
    fn process(&mut self, sample: f32) -> f32 {
        FirBandpass::process(self, sample)
    }
}

/// Windowed-sinc band-pass coefficient synthesis
fn design_bandpass(
    low_hz: f32,
    high_hz: f32,
    sample_rate: f32,
    num_taps: usize,
) -> Result<Vec<f64>> {
    let f_low = low_hz as f64 / sample_rate as f64;
    let f_high = high_hz as f64 / sample_rate as f64;

    if f_low < MIN_NORMALIZED_FREQ || f_high > MAX_NORMALIZED_FREQ || f_low >= f_high {
        return Err(FskError::FilterDesign(format!(
            "Invalid pass band: low={}, high={}, sample_rate={}",
            low_hz, high_hz, sample_rate
        )));
    }

    let mid = (num_taps - 1) as f64 / 2.0;
    let mut taps: Vec<f64> = (0..num_taps)
        .map(|k| {
            let n = k as f64 - mid;
            let ideal = 2.0 * f_high * sinc(2.0 * f_high * n) - 2.0 * f_low * sinc(2.0 * f_low * n);
            let window = 0.54 - 0.46 * (2.0 * PI * k as f64 / (num_taps - 1) as f64).cos();
            ideal * window
        })
        .collect();

    // Unity gain at the arithmetic-mean frequency of the two edges.
    let f_center = (f_low + f_high) / 2.0;
    let response: Complex64 = taps
        .iter()
        .enumerate()
        .map(|(k, &tap)| tap * Complex64::from_polar(1.0, -2.0 * PI * f_center * k as f64))
        .sum();
    let gain = response.norm();
    if gain < MIN_CENTER_GAIN {
        return Err(FskError::FilterDesign(format!(
            "Degenerate band {}-{} Hz: center gain {:e}",
            low_hz, high_hz, gain
        )));
    }
    for tap in taps.iter_mut() {
        *tap /= gain;
    }

    Ok(taps)
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}
