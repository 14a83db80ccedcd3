pub mod amplitude;
pub mod bandpass;
pub mod envelope;
pub mod filter;
pub mod fir;

pub use amplitude::AmplitudeMonitor;
pub use bandpass::FirBandpass;
pub use envelope::SlidingMax;
pub use filter::Filter;
pub use fir::FirDelayLine;
