use std::collections::BTreeMap;

use crate::entity::Candidate;

/// Closest candidate per group for one source entity.
///
/// An entry is replaced only by a strictly closer candidate, so the
/// first-seen candidate wins on equal distance.
#[derive(Debug, Clone, Default)]
pub struct CategoryBest {
    best: BTreeMap<String, Candidate>,
}

impl CategoryBest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&Candidate> {
        self.best.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Candidate)> {
        self.best.iter()
    }

    /// Offer a candidate; returns whether it became the group's best
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        match self.best.get(&candidate.category) {
            Some(existing) if candidate.distance >= existing.distance => false,
            _ => {
                self.best.insert(candidate.category.clone(), candidate);
                true
            }
        }
    }

    #[must_use]
    pub fn finalize(self) -> BTreeMap<String, Candidate> {
        self.best
    }
}
