//! Tunables for `ChainedHashDictionary`.

use crate::error::Error;

pub const DEFAULT_INITIAL_CAPACITY: usize = 16;
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
pub const DEFAULT_MAX_BIN_LEN: usize = 1000;

/// Growth settings. The defaults reproduce the fixed policy of the
/// dictionary: 16 bins, resize at load factor 0.75 or when one bin holds more
/// than 1000 pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DictConfig {
    /// Bin count at construction. Must be at least 2: the index function
    /// reduces hashes modulo `bins - 1`.
    pub initial_capacity: usize,
    /// A put that leaves `len / bins >= load_factor` doubles the bin count.
    pub load_factor: f64,
    /// A put that leaves its bin with more pairs than this doubles the bin
    /// count.
    pub max_bin_len: usize,
}

impl DictConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn with_max_bin_len(mut self, max_bin_len: usize) -> Self {
        self.max_bin_len = max_bin_len;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.initial_capacity < 2 {
            return Err(Error::InvalidConfig("initial_capacity must be at least 2"));
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(Error::InvalidConfig(
                "load_factor must be finite and positive",
            ));
        }
        if self.max_bin_len == 0 {
            return Err(Error::InvalidConfig("max_bin_len must be non-zero"));
        }
        Ok(())
    }
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            max_bin_len: DEFAULT_MAX_BIN_LEN,
        }
    }
}
