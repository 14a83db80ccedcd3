use serde_json::json;

use super::{FrameRecord, Formatter, iso8601_timestamp};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, record: &FrameRecord) -> String {
        json!({
            "ts": iso8601_timestamp(),
            "index": record.index,
            "sample_index": record.sample_index,
            "payload": record.payload,
            "checksum": record.checksum,
            "valid": record.valid,
        })
        .to_string()
    }
}
