mod noise;
mod signal;

pub use noise::{NoiseConfig, apply_awgn, signal_power};
pub use signal::{LEAD_IN_BITS, TAIL_BITS, encode_frame, frame_bits, frame_signal, modulate};
