use clap::Parser;

use fsklink::config::LinkConfig;
use fsklink::demod::Demodulator;
use fsklink::output::{FrameRecord, OutputFormat, create_formatter};
use fsklink::wav::load_wav;

/// Decode CRC-checked frames from an FSK I/Q recording
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// 2-channel (I, Q) WAV file to decode
    input: String,

    /// TOML file overriding the default link parameters
    #[arg(long)]
    config: Option<String>,

    /// Output format for decoded frames
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Suppress frames that fail the checksum
    #[arg(long)]
    valid_only: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LinkConfig::from_toml_file(path)?,
        None => LinkConfig::default(),
    };

    log::info!(
        "link: {} Hz sampling, {} baud, tones {}/{} Hz, {} byte payload",
        config.sampling.sample_rate,
        config.sampling.bit_rate,
        config.tones.low_hz,
        config.tones.high_hz,
        config.frame.payload_len
    );

    let (samples, wav_rate) = load_wav(&args.input)?;
    if wav_rate != config.sampling.sample_rate {
        anyhow::bail!(
            "WAV sample rate {} does not match configured rate {}",
            wav_rate,
            config.sampling.sample_rate
        );
    }

    let formatter = create_formatter(args.format);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }

    let mut demod = Demodulator::new(&config)?;
    let mut frame_index = 0u64;
    for (tick, &(i, q)) in samples.iter().enumerate() {
        if let Some(frame) = demod.process(i, q) {
            if frame.valid || !args.valid_only {
                let record = FrameRecord {
                    index: frame_index,
                    sample_index: tick as u64,
                    payload: frame.payload.to_vec(),
                    checksum: frame.checksum,
                    valid: frame.valid,
                };
                println!("{}", formatter.format(&record));
            }
            frame_index += 1;
        }
    }

    let stats = demod.stats();
    log::info!(
        "{} samples processed, peak amplitude {:.3}",
        demod.samples_processed(),
        demod.peak_amplitude()
    );
    eprintln!(
        "frames: {} ok, {} checksum failures",
        stats.frames_ok, stats.frames_err
    );

    Ok(())
}
