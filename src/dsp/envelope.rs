/// Sliding-window maximum envelope tracker
///
/// Holds the last M energy values in a ring buffer and reports their
/// maximum, acting as the symbol-rate-matched envelope estimator for one
/// tone. M is sized to roughly one lobe of the tone's own cycle, so the
/// window always covers at least one energy peak while the tone is present.
///
/// The maximum is recomputed by a linear scan on every call; M is small and
/// fixed, so no incremental structure is kept.
pub struct SlidingMax {
    window: Vec<f32>,
    index: usize,
}

impl SlidingMax {
    /// Create a tracker over the last `window_len` values
    pub fn new(window_len: usize) -> Self {
        Self {
            window: vec![0.0; window_len.max(1)],
            index: 0,
        }
    }

    /// Insert the next energy value and return the window maximum
    pub fn process(&mut self, energy: f32) -> f32 {
        self.window[self.index] = energy;
        self.index += 1;
        if self.index == self.window.len() {
            self.index = 0;
        }

        self.window.iter().copied().fold(f32::MIN, f32::max)
    }

    /// Window length in samples
    pub fn window_len(&self) -> usize {
        self.window.len()
    }
}
