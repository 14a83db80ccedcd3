//! Numeric constants for signal processing stability
//!
//! These constants define thresholds and epsilon values used by the
//! demodulation pipeline to ensure numerical stability.

/// Minimum acceptable magnitude of the synthesized filter's response at the
/// band center. A gain below this means the requested pass band is
/// degenerate and normalization would blow up the coefficients.
pub const MIN_CENTER_GAIN: f64 = 1e-9;

/// Smallest usable normalized frequency for a pass-band edge.
pub const MIN_NORMALIZED_FREQ: f64 = 1e-4;

/// Largest usable normalized frequency for a pass-band edge (just below
/// Nyquist).
pub const MAX_NORMALIZED_FREQ: f64 = 0.4999;
