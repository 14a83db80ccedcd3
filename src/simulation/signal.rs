//! Synthetic FSK waveform generation for tests and test-signal files.
//!
//! Produces the exact wire format the demodulator expects: a preamble of
//! "1" bit-periods, one "0" start bit, then each byte as 8 data bits
//! LSB-first plus a "0" framing bit, with a little-endian CRC-16/XMODEM
//! trailer appended to the payload.

use std::f32::consts::PI;

use crate::config::LinkConfig;
use crate::framing::crc16_xmodem;

/// Number of idle "0" bit-periods emitted before the preamble so the
/// receiver's filters warm up and the frame machine finds its anchor.
pub const LEAD_IN_BITS: usize = 4;

/// Number of idle "0" bit-periods emitted after the last framing bit.
pub const TAIL_BITS: usize = 2;

/// Append the CRC-16/XMODEM trailer (little-endian) to a payload
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = payload.to_vec();
    frame.extend_from_slice(&crc16_xmodem(payload).to_le_bytes());
    frame
}

/// Wire bits of one frame: preamble, start bit, destuffed bytes
pub fn frame_bits(payload: &[u8], preamble_bits: usize) -> Vec<bool> {
    let mut bits = vec![true; preamble_bits];
    bits.push(false); // start bit
    for byte in encode_frame(payload) {
        for bit in 0..8 {
            bits.push(byte & (1 << bit) != 0);
        }
        bits.push(false); // framing bit
    }
    bits
}

/// Modulate a bit sequence into a continuous-phase quadrature FSK waveform
///
/// Each bit occupies one bit period ("1" on the high tone, "0" on the low
/// tone); phase is continuous across tone switches. Returns one (I, Q)
/// pair per sample tick.
pub fn modulate(config: &LinkConfig, bits: &[bool]) -> Vec<(f32, f32)> {
    let sample_rate = config.sampling.sample_rate as f32;
    let ticks_per_bit = config.ticks_per_bit();

    let mut samples = Vec::new();
    let mut phase = 0.0f32;
    for (k, &bit) in bits.iter().enumerate() {
        let tone_hz = if bit {
            config.tones.high_hz
        } else {
            config.tones.low_hz
        };
        let step = 2.0 * PI * tone_hz / sample_rate;

        let end = ((k + 1) as f32 * ticks_per_bit).round() as usize;
        while samples.len() < end {
            samples.push((phase.cos(), phase.sin()));
            phase += step;
            if phase > 2.0 * PI {
                phase -= 2.0 * PI;
            }
        }
    }
    samples
}

/// Complete frame waveform: lead-in, preamble, frame, tail
///
/// The lead-in rides on the low tone so the demodulator sees the "0"
/// anchor the frame machine requires before a preamble.
pub fn frame_signal(config: &LinkConfig, payload: &[u8]) -> Vec<(f32, f32)> {
    let preamble = crate::config::PREAMBLE_BITS as usize;
    let mut bits = vec![false; LEAD_IN_BITS];
    bits.extend(frame_bits(payload, preamble));
    bits.extend(std::iter::repeat_n(false, TAIL_BITS));
    modulate(config, &bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_frame_appends_crc_le() {
        let payload = [0x01, 0x02];
        let frame = encode_frame(&payload);
        let crc = crc16_xmodem(&payload);
        assert_eq!(frame.len(), 4);
        assert_eq!(frame[2], (crc & 0xFF) as u8);
        assert_eq!(frame[3], (crc >> 8) as u8);
    }

    #[test]
    fn test_frame_bits_layout() {
        let bits = frame_bits(&[0x00], 10);
        // 10 preamble + 1 start + 3 bytes x 9 bits
        assert_eq!(bits.len(), 10 + 1 + 3 * 9);
        assert!(bits[..10].iter().all(|&b| b));
        assert!(!bits[10]);
        // 0x00 byte: 8 zero bits + framing zero
        assert!(bits[11..20].iter().all(|&b| !b));
    }

    #[test]
    fn test_modulate_length_matches_bits() {
        let config = LinkConfig::default();
        let bits = vec![true; 16];
        let samples = modulate(&config, &bits);
        let expected = (16.0 * config.ticks_per_bit()).round() as usize;
        assert_eq!(samples.len(), expected);
    }

    #[test]
    fn test_modulate_unit_amplitude() {
        let config = LinkConfig::default();
        let samples = modulate(&config, &[true, false, true]);
        for (i, q) in samples {
            let magnitude = (i * i + q * q).sqrt();
            assert!((magnitude - 1.0).abs() < 1e-3);
        }
    }
}
