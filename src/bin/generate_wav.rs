use clap::Parser;

use fsklink::config::LinkConfig;
use fsklink::simulation::{NoiseConfig, frame_signal};
use fsklink::wav::save_wav;

/// Generate a synthetic FSK frame recording for decoder testing
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Output WAV path
    output: String,

    /// Payload bytes, hex, e.g. "0102030405060708"
    #[arg(long, default_value = "0102030405060708")]
    payload: String,

    /// Number of frame repetitions
    #[arg(long, default_value_t = 1)]
    repeat: usize,

    /// Add white Gaussian noise at this SNR in dB
    #[arg(long)]
    snr_db: Option<f32>,

    /// RNG seed for reproducible noise
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the default link parameters
    #[arg(long)]
    config: Option<String>,
}

fn parse_hex(s: &str) -> anyhow::Result<Vec<u8>> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.len() % 2 != 0 {
        anyhow::bail!("hex payload must have an even number of digits");
    }
    (0..s.len())
        .step_by(2)
        .map(|i| -> anyhow::Result<u8> { Ok(u8::from_str_radix(&s[i..i + 2], 16)?) })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LinkConfig::from_toml_file(path)?,
        None => LinkConfig::default(),
    };

    let payload = parse_hex(&args.payload)?;
    if payload.len() != config.frame.payload_len {
        anyhow::bail!(
            "payload is {} bytes, link expects {}",
            payload.len(),
            config.frame.payload_len
        );
    }

    let mut samples = Vec::new();
    for _ in 0..args.repeat.max(1) {
        samples.extend(frame_signal(&config, &payload));
    }

    if let Some(snr_db) = args.snr_db {
        let mut noise = NoiseConfig::default().with_awgn(snr_db);
        noise.seed = args.seed;
        noise.apply(&mut samples);
    }

    save_wav(&args.output, &samples, config.sampling.sample_rate)?;
    log::info!(
        "wrote {} samples ({} frames) to {}",
        samples.len(),
        args.repeat.max(1),
        args.output
    );

    Ok(())
}
