/// FIR delay line shared by the band-pass filter instances
///
/// Holds the tap coefficients and a fixed ring buffer of the most recent
/// inputs; both are sized once at construction and never resized.
pub struct FirDelayLine {
    taps: Vec<f64>,
    history: Vec<f64>,
    pos: usize,
}

impl FirDelayLine {
    /// Create a delay line for the given tap coefficients
    pub fn new(taps: Vec<f64>) -> Self {
        Self {
            history: vec![0.0; taps.len()],
            taps,
            pos: 0,
        }
    }

    /// Convolve the next input sample against the taps
    ///
    /// Overwrites the oldest stored sample and returns the filtered value.
    /// The ring buffer is walked as two contiguous reverse slices so the
    /// inner loop carries no modulo arithmetic.
    pub fn process(&mut self, sample: f32) -> f32 {
        self.history[self.pos] = sample as f64;

        let (up_to_newest, wrapped) = self.history.split_at(self.pos + 1);
        let newest_first = up_to_newest.iter().rev().chain(wrapped.iter().rev());
        let mut acc = 0.0f64;
        for (&tap, &value) in self.taps.iter().zip(newest_first) {
            acc += tap * value;
        }

        self.pos += 1;
        if self.pos == self.history.len() {
            self.pos = 0;
        }
        acc as f32
    }

    /// Number of taps (filter length)
    pub fn num_taps(&self) -> usize {
        self.taps.len()
    }

    /// Access the tap coefficients
    pub fn taps(&self) -> &[f64] {
        &self.taps
    }
}
