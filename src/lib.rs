pub mod config;
pub mod constants;
pub mod demod;
pub mod dsp;
pub mod error;
pub mod framing;
pub mod output;
pub mod wav;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::LinkConfig;
pub use demod::Demodulator;
pub use error::{FskError, Result};
pub use framing::{FrameEvent, LinkStats};
pub use wav::{load_wav, save_wav};
