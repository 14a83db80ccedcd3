//! End-to-end decode tests: synthetic FSK waveforms through the full
//! filter/envelope/comparator/framing pipeline.

use fsklink::config::LinkConfig;
use fsklink::demod::Demodulator;
use fsklink::framing::crc16_xmodem;
use fsklink::simulation::{LEAD_IN_BITS, frame_bits, frame_signal, modulate};

/// Run a sample stream through a fresh pipeline, collecting
/// (tick, payload, checksum, valid) per completed frame.
fn decode(config: &LinkConfig, samples: &[(f32, f32)]) -> (Vec<(usize, Vec<u8>, u16, bool)>, Demodulator) {
    let mut demod = Demodulator::new(config).unwrap();
    let mut events = Vec::new();
    for (tick, &(i, q)) in samples.iter().enumerate() {
        if let Some(frame) = demod.process(i, q) {
            events.push((tick, frame.payload.to_vec(), frame.checksum, frame.valid));
        }
    }
    (events, demod)
}

#[test]
fn test_decodes_known_payload() {
    // 48 kHz sampling at 2048 baud: 23 filter taps, ~23.4 ticks per bit,
    // preamble threshold just under 223 ticks.
    let config = LinkConfig::default();
    assert_eq!(config.filter_taps(), 23);

    let payload = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
    let samples = frame_signal(&config, &payload);
    let (events, demod) = decode(&config, &samples);

    assert_eq!(events.len(), 1, "expected exactly one frame");
    let (_, bytes, checksum, valid) = &events[0];
    assert!(valid);
    assert_eq!(bytes.as_slice(), &payload);
    assert_eq!(*checksum, crc16_xmodem(&payload));

    let stats = demod.stats();
    assert_eq!(stats.frames_ok, 1);
    assert_eq!(stats.frames_err, 0);
}

#[test]
fn test_validity_agrees_with_recomputed_crc() {
    let config = LinkConfig::default();

    for payload in [
        [0x00u8; 8],
        [0xFFu8; 8],
        [0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x23, 0x45, 0x67],
    ] {
        let samples = frame_signal(&config, &payload);
        let (events, _) = decode(&config, &samples);
        for (_, bytes, checksum, valid) in &events {
            assert_eq!(
                crc16_xmodem(bytes) == *checksum,
                *valid,
                "reported validity must match recomputed CRC for {:02x?}",
                bytes
            );
        }
    }
}

#[test]
fn test_identical_input_identical_events() {
    let config = LinkConfig::default();
    let payload = [0x55, 0xAA, 0x00, 0xFF, 0x12, 0x34, 0x56, 0x78];
    let samples = frame_signal(&config, &payload);

    let (first, demod_a) = decode(&config, &samples);
    let (second, demod_b) = decode(&config, &samples);

    assert_eq!(first, second);
    assert_eq!(demod_a.stats(), demod_b.stats());
}

#[test]
fn test_back_to_back_frames() {
    let config = LinkConfig::default();
    let first = [0x11u8; 8];
    let second = [0x22u8; 8];

    let mut samples = frame_signal(&config, &first);
    samples.extend(frame_signal(&config, &second));
    let (events, demod) = decode(&config, &samples);

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].1.as_slice(), &first);
    assert_eq!(events[1].1.as_slice(), &second);
    assert!(events[0].3 && events[1].3);
    assert_eq!(demod.stats().frames_ok, 2);
}

#[test]
fn test_single_corrupted_bit_fails_checksum() {
    let config = LinkConfig::default();
    let payload = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    // Rebuild the wire bits with one payload data bit flipped, preceded by
    // the same low-tone lead-in frame_signal would emit.
    let mut bits = vec![false; LEAD_IN_BITS];
    bits.extend(frame_bits(&payload, 10));
    bits.push(false);
    bits.push(false);
    let first_data_bit = LEAD_IN_BITS + 10 + 1;
    bits[first_data_bit] = !bits[first_data_bit];

    let samples = modulate(&config, &bits);
    let (events, demod) = decode(&config, &samples);

    assert_eq!(events.len(), 1);
    assert!(!events[0].3, "corrupted frame must fail the checksum");
    assert_eq!(demod.stats().frames_ok, 0);
    assert_eq!(demod.stats().frames_err, 1);
}

#[test]
fn test_non_default_payload_length() {
    let mut config = LinkConfig::default();
    config.frame.payload_len = 4;

    let payload = [0xCA, 0xFE, 0xBA, 0xBE];
    let samples = frame_signal(&config, &payload);
    let (events, demod) = decode(&config, &samples);

    assert_eq!(events.len(), 1);
    assert!(events[0].3);
    assert_eq!(events[0].1.as_slice(), &payload);
    assert_eq!(demod.stats().frames_ok, 1);
}
