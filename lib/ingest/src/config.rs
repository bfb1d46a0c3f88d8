use lookalike_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root of the per-group profile directories
pub const DEFAULT_INPUT_ROOT: &str = "data/profile";

/// Options consumed by the embedding provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Where embeddings come from (model directory or precomputed file)
    pub source: PathBuf,
    /// Edge length of the aligned face crop, in pixels
    pub image_size: u32,
    /// Margin around the detected face box, in pixels
    pub margin: u32,
    /// Upper bound on the fraction of accelerator memory to use
    pub gpu_memory_fraction: f32,
}

impl EmbeddingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.image_size == 0 {
            return Err(Error::InvalidConfig("image_size must be positive".to_string()));
        }
        if !(self.gpu_memory_fraction > 0.0 && self.gpu_memory_fraction <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "gpu_memory_fraction must be in (0, 1], got {}",
                self.gpu_memory_fraction
            )));
        }
        Ok(())
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("models/embeddings.json"),
            image_size: 160,
            margin: 44,
            gpu_memory_fraction: 1.0,
        }
    }
}

/// Sizing of the fetch worker pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchConfig {
    pub workers: usize,
    pub queue_capacity: usize,
}

impl FetchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".to_string()));
        }
        if self.queue_capacity == 0 {
            return Err(Error::InvalidConfig("queue_capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            queue_capacity: 64,
        }
    }
}
