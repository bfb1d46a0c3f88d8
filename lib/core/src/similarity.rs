//! Batch-relative similarity.
//!
//! A raw distance only becomes a similarity once the smallest distance of the
//! whole batch is known, so scoring happens strictly after the all-pairs pass.

/// Running minimum distance across every pair in a batch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalMin {
    min: f32,
    observed: u64,
}

impl GlobalMin {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: f32::INFINITY,
            observed: 0,
        }
    }

    #[inline]
    pub fn observe(&mut self, distance: f32) {
        self.observed += 1;
        if distance < self.min {
            self.min = distance;
        }
    }

    /// Current minimum; `+inf` until a pair has been observed
    #[inline]
    pub fn value(&self) -> f32 {
        self.min
    }

    /// Number of pairs observed so far
    #[inline]
    pub fn observed(&self) -> u64 {
        self.observed
    }
}

impl Default for GlobalMin {
    fn default() -> Self {
        Self::new()
    }
}

/// `round(1 / (1 + distance - global_min), 2)`
///
/// Equals exactly `1.0` at the global minimum and never increases as the
/// distance grows. Rounding to two decimals can merge close distances into
/// the same score, and drops to `0.0` once `distance - global_min >= 199`.
#[inline]
pub fn similarity(distance: f32, global_min: f32) -> f64 {
    let raw = 1.0 / (1.0 + f64::from(distance) - f64::from(global_min));
    round2(raw)
}

#[inline]
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
