use super::{FrameRecord, Formatter, hex_bytes};

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, record: &FrameRecord) -> String {
        format!(
            "Frame {:>4} @{:>8}: [{}] crc {:#06x} {}",
            record.index,
            record.sample_index,
            hex_bytes(&record.payload),
            record.checksum,
            if record.valid { "OK" } else { "BAD" }
        )
    }
}
