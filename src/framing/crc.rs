/// CRC-16/XMODEM polynomial
const POLY: u16 = 0x1021;

/// CRC-16/XMODEM over `data`
///
/// Polynomial 0x1021, initial value 0, no final XOR, bytes fed MSB-first.
/// Frames are ten bytes, so the bitwise form is plenty; no table.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_value() {
        // Standard CRC-16/XMODEM check input
        assert_eq!(crc16_xmodem(b"123456789"), 0x31C3);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(crc16_xmodem(&[]), 0x0000);
    }

    #[test]
    fn test_single_bit_flip_changes_crc() {
        let payload = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let reference = crc16_xmodem(&payload);

        for byte in 0..payload.len() {
            for bit in 0..8 {
                let mut corrupted = payload;
                corrupted[byte] ^= 1 << bit;
                assert_ne!(
                    crc16_xmodem(&corrupted),
                    reference,
                    "flip of byte {} bit {} not detected",
                    byte,
                    bit
                );
            }
        }
    }
}
