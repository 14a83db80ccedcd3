mod csv;
mod json;
mod text;

use chrono::Utc;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One decoded frame, as presented to the output sink
#[derive(Debug, Clone, serde::Serialize)]
pub struct FrameRecord {
    /// Frame ordinal within this run (valid and invalid frames both count)
    pub index: u64,
    /// Sample tick at which the frame completed
    pub sample_index: u64,
    /// Decoded payload bytes
    pub payload: Vec<u8>,
    /// Checksum received in the frame trailer
    pub checksum: u16,
    /// Whether the checksum matched
    pub valid: bool,
}

pub trait Formatter: Send {
    fn format(&self, record: &FrameRecord) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
