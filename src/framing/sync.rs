use log::debug;

use crate::config::LinkConfig;
use crate::framing::destuffer::{ByteDestuffer, DestuffStatus};
use crate::framing::{FrameEvent, LinkStats};

/// Bit/byte/frame synchronization state
///
/// Every detected framing error and every completed frame routes back to
/// `Undefined`; the machine has no unrecoverable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Waiting for a clean "0" tick to anchor timing
    Undefined,
    /// Waiting for the first "1" tick of a preamble run
    WaitForSync,
    /// Counting consecutive "1" ticks of the preamble
    Sync,
    /// Preamble accepted; waiting for the start bit's center
    Start,
    /// Locked; sampling data bits at bit centers
    Bit,
}

/// The bit/byte/frame state machine
///
/// Consumes one comparator bit per raw sample tick. Bit timing is phased off
/// the preamble's trailing edge, offset by half a bit period so samples land
/// at bit centers. The next-bit threshold is a real-valued accumulator
/// advanced by one bit period per firing, so a non-integer samples-per-bit
/// ratio never accumulates drift.
pub struct FrameSync {
    state: SyncState,
    ticks_per_bit: f32,
    preamble_min_ticks: f32,
    preamble_ticks: u32,
    tick: u32,
    next_bit_tick: f32,
    destuffer: ByteDestuffer,
    stats: LinkStats,
}

impl FrameSync {
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            state: SyncState::Undefined,
            ticks_per_bit: config.ticks_per_bit(),
            preamble_min_ticks: config.preamble_min_ticks(),
            preamble_ticks: 0,
            tick: 0,
            next_bit_tick: 0.0,
            destuffer: ByteDestuffer::new(config.frame.payload_len),
            stats: LinkStats::default(),
        }
    }

    /// Feed the comparator bit for one sample tick
    ///
    /// Returns a frame event at the tick a frame completes (valid or not);
    /// `None` otherwise.
    pub fn process(&mut self, bit: bool) -> Option<FrameEvent<'_>> {
        match self.state {
            SyncState::Undefined => {
                if !bit {
                    self.state = SyncState::WaitForSync;
                }
                None
            }
            SyncState::WaitForSync => {
                if bit {
                    self.preamble_ticks = 1;
                    self.state = SyncState::Sync;
                }
                None
            }
            SyncState::Sync => {
                if bit {
                    // A stuck-high line must not wrap the run counter.
                    self.preamble_ticks = self.preamble_ticks.saturating_add(1);
                } else if self.preamble_ticks as f32 >= self.preamble_min_ticks {
                    debug!("preamble locked after {} ticks", self.preamble_ticks);
                    self.tick = 0;
                    self.next_bit_tick = self.ticks_per_bit / 2.0;
                    self.state = SyncState::Start;
                } else {
                    // Run too short; this "0" anchors the next attempt.
                    self.state = SyncState::WaitForSync;
                }
                None
            }
            SyncState::Start => {
                self.tick += 1;
                if self.tick as f32 >= self.next_bit_tick {
                    self.next_bit_tick += self.ticks_per_bit;
                    if bit {
                        debug!("start bit was 1, dropping sync");
                        self.reset();
                    } else {
                        self.destuffer.reset();
                        self.state = SyncState::Bit;
                    }
                }
                None
            }
            SyncState::Bit => {
                self.tick += 1;
                if (self.tick as f32) < self.next_bit_tick {
                    return None;
                }
                self.next_bit_tick += self.ticks_per_bit;

                match self.destuffer.push_bit(bit) {
                    DestuffStatus::Pending => None,
                    DestuffStatus::FramingError => {
                        debug!("framing bit violation, dropping sync");
                        self.reset();
                        None
                    }
                    DestuffStatus::FrameComplete { valid, checksum } => {
                        if valid {
                            self.stats.frames_ok += 1;
                        } else {
                            self.stats.frames_err += 1;
                        }
                        debug!(
                            "frame complete: valid={} checksum={:#06x} ok={} err={}",
                            valid, checksum, self.stats.frames_ok, self.stats.frames_err
                        );
                        self.reset();
                        Some(FrameEvent {
                            payload: self.destuffer.payload(),
                            checksum,
                            valid,
                        })
                    }
                }
            }
        }
    }

    /// Current synchronization state
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Running frame counters
    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    fn reset(&mut self) {
        self.state = SyncState::Undefined;
        self.preamble_ticks = 0;
        self.tick = 0;
        self.next_bit_tick = 0.0;
    }
}
