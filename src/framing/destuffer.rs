use crate::config::CHECKSUM_LEN;
use crate::framing::crc::crc16_xmodem;

/// Outcome of feeding one bit-center sample to the destuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestuffStatus {
    /// Bit absorbed, nothing completed yet
    Pending,
    /// The 9th (framing) bit of a byte was 1; internal state has been reset
    FramingError,
    /// The frame buffer just filled; checksum evaluated, counters reset
    FrameComplete {
        /// Whether the trailer matched CRC-16/XMODEM of the payload
        valid: bool,
        /// Checksum received in the trailer
        checksum: u16,
    },
}

/// Byte destuffer over the bit-synchronized stream
///
/// Per-byte framing is 8 data bits LSB-first followed by one mandatory "0"
/// bit (asynchronous-serial style, but carried on the already synchronized
/// tick stream). Completed bytes accumulate in a fixed frame buffer; filling
/// it triggers checksum evaluation against the little-endian CRC trailer.
///
/// The bit accumulator never holds more than 8 pending bits, and the frame
/// index never exceeds the frame length; both reset atomically on every
/// completion or framing error.
pub struct ByteDestuffer {
    accumulator: u8,
    bit_count: u8,
    frame: Vec<u8>,
    index: usize,
    payload_len: usize,
}

impl ByteDestuffer {
    /// Create a destuffer for `payload_len`-byte payloads
    ///
    /// The frame buffer (payload plus checksum trailer) is allocated here
    /// and never resized.
    pub fn new(payload_len: usize) -> Self {
        Self {
            accumulator: 0,
            bit_count: 0,
            frame: vec![0; payload_len + CHECKSUM_LEN],
            index: 0,
            payload_len,
        }
    }

    /// Feed one bit-center sample
    pub fn push_bit(&mut self, bit: bool) -> DestuffStatus {
        if self.bit_count < 8 {
            if bit {
                self.accumulator |= 1 << self.bit_count;
            }
            self.bit_count += 1;
            return DestuffStatus::Pending;
        }

        // 9th bit: framing, must be 0
        if bit {
            self.reset();
            return DestuffStatus::FramingError;
        }

        self.frame[self.index] = self.accumulator;
        self.index += 1;
        self.accumulator = 0;
        self.bit_count = 0;

        if self.index < self.frame.len() {
            return DestuffStatus::Pending;
        }

        self.index = 0;
        let checksum = u16::from_le_bytes([
            self.frame[self.payload_len],
            self.frame[self.payload_len + 1],
        ]);
        let valid = crc16_xmodem(&self.frame[..self.payload_len]) == checksum;
        DestuffStatus::FrameComplete { valid, checksum }
    }

    /// Payload bytes of the most recently completed frame
    ///
    /// Only meaningful immediately after `push_bit` returned
    /// `FrameComplete`; the buffer is overwritten by the next frame.
    pub fn payload(&self) -> &[u8] {
        &self.frame[..self.payload_len]
    }

    /// Drop any partially assembled byte and frame
    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.bit_count = 0;
        self.index = 0;
    }
}
