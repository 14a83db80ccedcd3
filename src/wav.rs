use hound::{WavReader, WavSpec, WavWriter};
use std::path::Path;

use crate::error::{FskError, Result};

/// Save a quadrature sample stream as a 2-channel float WAV (I left, Q right)
pub fn save_wav<P: AsRef<Path>>(path: P, samples: &[(f32, f32)], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &(i, q) in samples {
        writer.write_sample(i)?;
        writer.write_sample(q)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Load a 2-channel float WAV as (I, Q) pairs, returning the sample rate
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<(f32, f32)>, u32)> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels != 2 {
        return Err(FskError::Config(format!(
            "expected 2-channel I/Q WAV, got {} channels",
            spec.channels
        )));
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let pairs = interleaved
        .chunks_exact(2)
        .map(|c| (c[0], c[1]))
        .collect();
    Ok((pairs, spec.sample_rate))
}
