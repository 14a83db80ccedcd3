use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Channel impairment configuration for synthetic waveforms
#[derive(Clone, Debug, Default)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub snr_db: Option<f32>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, snr_db: f32) -> Self {
        self.snr_db = Some(snr_db);
        self
    }

    /// Apply the configured impairments to a quadrature sample stream
    pub fn apply(&self, samples: &mut [(f32, f32)]) {
        if let Some(snr_db) = self.snr_db {
            let mut rng = create_rng(self.seed);
            apply_awgn(samples, snr_db, &mut rng);
        }
    }
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Mean per-component power of a quadrature stream
pub fn signal_power(samples: &[(f32, f32)]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&(i, q)| i * i + q * q).sum::<f32>() / (2.0 * samples.len() as f32)
}

/// Add white Gaussian noise to both components at the given SNR
pub fn apply_awgn(samples: &mut [(f32, f32)], snr_db: f32, rng: &mut ChaCha8Rng) {
    let power = signal_power(samples);
    if power == 0.0 {
        return;
    }

    let snr_linear = 10.0_f32.powf(snr_db / 10.0);
    let noise_std = (power / snr_linear).sqrt();
    let normal = Normal::new(0.0, noise_std as f64).unwrap();

    for (i, q) in samples.iter_mut() {
        *i += normal.sample(rng) as f32;
        *q += normal.sample(rng) as f32;
    }
}
