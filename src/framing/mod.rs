pub mod crc;
pub mod destuffer;
pub mod sync;

pub use crc::crc16_xmodem;
pub use destuffer::ByteDestuffer;
pub use sync::{FrameSync, SyncState};

/// A completed frame, reported once at the tick its last framing bit lands
///
/// Borrows the pipeline's frame buffer: the payload is only valid for the
/// duration of the call that produced it. Consumers that keep frames copy
/// the bytes out.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameEvent<'a> {
    /// Decoded payload bytes (fixed count, excludes the checksum trailer)
    pub payload: &'a [u8],
    /// Checksum received in the trailer (little-endian on the wire)
    pub checksum: u16,
    /// Whether the received checksum matches CRC-16/XMODEM of the payload
    pub valid: bool,
}

/// Running frame counters, monotonically increasing, never reset by the core
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Frames completed with a matching checksum
    pub frames_ok: u32,
    /// Frames completed with a checksum mismatch
    pub frames_err: u32,
}
