use super::{FrameRecord, Formatter, hex_bytes, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, record: &FrameRecord) -> String {
        format!(
            "{},{},{},{},{:#06x},{}",
            iso8601_timestamp(),
            record.index,
            record.sample_index,
            hex_bytes(&record.payload).replace(' ', ""),
            record.checksum,
            record.valid
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("timestamp,index,sample_index,payload,checksum,valid")
    }
}
