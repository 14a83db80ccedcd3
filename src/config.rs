//! Configuration for the FSK link demodulator.
//!
//! All parameters are fixed before the pipeline is built: the demodulator
//! derives filter lengths, envelope windows and bit-timing thresholds from
//! them once, at construction. Nothing here is re-tuned at run time.

use serde::Deserialize;
use std::path::Path;

use crate::error::{FskError, Result};

/// Number of "1" bit-periods the transmitter sends as preamble.
pub const PREAMBLE_BITS: f32 = 10.0;

/// Number of checksum bytes trailing the payload (CRC-16, little-endian).
pub const CHECKSUM_LEN: usize = 2;

/// System-wide demodulator configuration
///
/// Use `LinkConfig::default()` for the nominal link parameters
/// (48 kHz sampling, 2048 baud, 4/6 kHz tone pair).
///
/// # Example
/// ```
/// use fsklink::config::LinkConfig;
///
/// let mut config = LinkConfig::default();
/// config.frame.payload_len = 8;
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Sampling and symbol timing
    pub sampling: SamplingConfig,
    /// FSK tone pair and pass-band width
    pub tones: ToneConfig,
    /// Frame geometry
    pub frame: FrameConfig,
    /// Amplitude telemetry
    pub monitor: MonitorConfig,
}

/// Sampling and symbol-rate configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Input sample rate in Hz (one quadrature pair per tick)
    pub sample_rate: u32,
    /// Symbol rate in bits per second
    pub bit_rate: f32,
}

/// FSK tone configuration
///
/// The low tone carries "0", the high tone carries "1". Each tone gets its
/// own band-pass filter centered on it, `bandwidth_hz` wide.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    /// "0" (space) tone frequency in Hz
    pub low_hz: f32,
    /// "1" (mark) tone frequency in Hz
    pub high_hz: f32,
    /// Pass-band width per tone in Hz
    pub bandwidth_hz: f32,
}

/// Frame geometry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Payload bytes per frame (excluding the two checksum bytes)
    pub payload_len: usize,
}

/// Amplitude monitor configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Per-sample decay factor of the peak-hold estimate (just below 1)
    pub peak_decay: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            bit_rate: 2048.0,
        }
    }
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            low_hz: 4000.0,
            high_hz: 6000.0,
            bandwidth_hz: 2000.0,
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { payload_len: 8 }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { peak_decay: 0.9999 }
    }
}

impl ToneConfig {
    /// Pass-band edges (low, high) for the "0" tone filter
    pub fn low_band(&self) -> (f32, f32) {
        (
            self.low_hz - self.bandwidth_hz / 2.0,
            self.low_hz + self.bandwidth_hz / 2.0,
        )
    }

    /// Pass-band edges (low, high) for the "1" tone filter
    pub fn high_band(&self) -> (f32, f32) {
        (
            self.high_hz - self.bandwidth_hz / 2.0,
            self.high_hz + self.bandwidth_hz / 2.0,
        )
    }
}

impl LinkConfig {
    /// Samples per bit period (generally non-integer)
    pub fn ticks_per_bit(&self) -> f32 {
        self.sampling.sample_rate as f32 / self.sampling.bit_rate
    }

    /// FIR filter length: the nearest odd integer to the samples-per-bit
    /// ratio, so the impulse response spans roughly one symbol period.
    pub fn filter_taps(&self) -> usize {
        let ratio = self.ticks_per_bit();
        let n = ratio.round() as usize;
        if n.is_multiple_of(2) {
            if ratio >= n as f32 { n + 1 } else { n - 1 }
        } else {
            n
        }
    }

    /// Envelope window length for the "0" tone, roughly one lobe of the
    /// tone's own cycle.
    pub fn low_envelope_window(&self) -> usize {
        (0.5 * self.sampling.sample_rate as f32 / self.tones.low_hz).round() as usize
    }

    /// Envelope window length for the "1" tone.
    pub fn high_envelope_window(&self) -> usize {
        (0.5 * self.sampling.sample_rate as f32 / self.tones.high_hz).round() as usize + 1
    }

    /// Minimum run of "1" sample ticks accepted as a preamble: ten bit
    /// periods less half a bit, the boundary tolerance for the last
    /// preamble bit.
    pub fn preamble_min_ticks(&self) -> f32 {
        (PREAMBLE_BITS - 0.5) * self.ticks_per_bit()
    }

    /// Total frame length in bytes: payload plus checksum trailer
    pub fn frame_len(&self) -> usize {
        self.frame.payload_len + CHECKSUM_LEN
    }

    /// Check the configuration for internal consistency
    ///
    /// # Errors
    /// Returns `FskError::Config` for parameters the pipeline cannot be
    /// built from (bands outside (0, Nyquist), overlapping tone bands,
    /// empty payload, degenerate timing).
    pub fn validate(&self) -> Result<()> {
        let nyquist = self.sampling.sample_rate as f32 / 2.0;

        if self.sampling.bit_rate <= 0.0 {
            return Err(FskError::Config("bit rate must be positive".into()));
        }
        if self.ticks_per_bit() < 2.0 {
            return Err(FskError::Config(format!(
                "bit rate {} too high for sample rate {}",
                self.sampling.bit_rate, self.sampling.sample_rate
            )));
        }

        let (low_lo, low_hi) = self.tones.low_band();
        let (high_lo, high_hi) = self.tones.high_band();
        if low_lo <= 0.0 || high_hi >= nyquist {
            return Err(FskError::Config(format!(
                "tone bands {:.0}-{:.0} / {:.0}-{:.0} Hz outside (0, {:.0}) Hz",
                low_lo, low_hi, high_lo, high_hi, nyquist
            )));
        }
        if self.tones.low_hz >= self.tones.high_hz {
            return Err(FskError::Config(
                "low tone must be below high tone".into(),
            ));
        }
        if low_hi > high_lo {
            return Err(FskError::Config(format!(
                "tone bands overlap: {:.0}-{:.0} and {:.0}-{:.0} Hz",
                low_lo, low_hi, high_lo, high_hi
            )));
        }

        if self.frame.payload_len == 0 {
            return Err(FskError::Config("payload length must be non-zero".into()));
        }

        if !(0.0..1.0).contains(&self.monitor.peak_decay) {
            return Err(FskError::Config(format!(
                "peak decay {} must be in [0, 1)",
                self.monitor.peak_decay
            )));
        }

        Ok(())
    }

    /// Load a configuration from a TOML file, falling back to defaults for
    /// omitted sections.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| FskError::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        let config: LinkConfig =
            toml::from_str(&text).map_err(|e| FskError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(LinkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_derived_constants_nominal() {
        let config = LinkConfig::default();

        // 48000 / 2048 = 23.4375 samples per bit
        assert!((config.ticks_per_bit() - 23.4375).abs() < 1e-4);
        assert_eq!(config.filter_taps(), 23);
        assert_eq!(config.low_envelope_window(), 6);
        assert_eq!(config.high_envelope_window(), 5);
        assert_eq!(config.frame_len(), 10);

        // 9.5 bit periods
        assert!((config.preamble_min_ticks() - 222.65625).abs() < 1e-3);
    }

    #[test]
    fn test_filter_taps_always_odd() {
        let mut config = LinkConfig::default();
        for bit_rate in [1000.0, 1200.0, 2000.0, 2048.0, 3000.0, 4800.0] {
            config.sampling.bit_rate = bit_rate;
            assert_eq!(config.filter_taps() % 2, 1, "bit rate {}", bit_rate);
        }
    }

    #[test]
    fn test_validate_rejects_overlapping_bands() {
        let mut config = LinkConfig::default();
        config.tones.bandwidth_hz = 3000.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_band_above_nyquist() {
        let mut config = LinkConfig::default();
        config.tones.high_hz = 23_900.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_payload() {
        let mut config = LinkConfig::default();
        config.frame.payload_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_tones() {
        let mut config = LinkConfig::default();
        config.tones.low_hz = 7000.0;
        assert!(config.validate().is_err());
    }
}
