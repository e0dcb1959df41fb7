/// Controls how a dataset source is loaded and normalized.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    /// Whether the item order is uniformly shuffled after normalization.
    ///
    /// Shuffling uses a fresh thread-local RNG; there is no seed contract and
    /// no reproducibility guarantee across runs.
    pub shuffle: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { shuffle: true }
    }
}

impl LoadOptions {
    /// Override whether the loaded item order is shuffled.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}
