/// Exponential peak-hold amplitude tracker
///
/// Tracks the peak magnitude of the raw input with a slow exponential decay
/// so external calibration can observe front-end drive levels. Runs in
/// parallel with the decision chain and is never consulted by it.
pub struct AmplitudeMonitor {
    peak: f32,
    decay: f32,
    samples: u64,
}

impl AmplitudeMonitor {
    /// Create a monitor with the given per-sample decay factor (just below 1)
    pub fn new(decay: f32) -> Self {
        Self {
            peak: 0.0,
            decay,
            samples: 0,
        }
    }

    /// Feed the next raw sample
    ///
    /// Decays the held peak, then clamps it up to the new magnitude if
    /// exceeded.
    pub fn process(&mut self, sample: f32) {
        self.peak *= self.decay;
        let magnitude = sample.abs();
        if magnitude > self.peak {
            self.peak = magnitude;
        }
        self.samples += 1;
    }

    /// Current peak estimate
    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Total samples observed since construction
    pub fn samples(&self) -> u64 {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_peak_clamps_up_immediately() {
        let mut monitor = AmplitudeMonitor::new(0.9999);
        monitor.process(0.25);
        monitor.process(-0.75);
        assert_relative_eq!(monitor.peak(), 0.75);
    }

    #[test]
    fn test_peak_decays_between_hits() {
        let mut monitor = AmplitudeMonitor::new(0.9);
        monitor.process(1.0);
        for _ in 0..10 {
            monitor.process(0.0);
        }
        assert_relative_eq!(monitor.peak(), 0.9f32.powi(10), epsilon = 1e-6);
    }

    #[test]
    fn test_sample_counter_monotonic() {
        let mut monitor = AmplitudeMonitor::new(0.9999);
        for _ in 0..100 {
            monitor.process(0.1);
        }
        assert_eq!(monitor.samples(), 100);
    }
}
