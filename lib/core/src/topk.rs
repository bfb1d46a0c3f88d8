//! Bounded collection of the closest candidates seen for one source entity.
//!
//! A full collection always admits the new candidate first and then evicts
//! its maximum. A candidate whose distance equals the current maximum is
//! therefore kept, and when several members share the maximum the earliest
//! inserted one is evicted.

use crate::entity::Candidate;

/// Number of matches kept per entity unless configured otherwise
pub const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Clone)]
pub struct TopK {
    capacity: usize,
    // Insertion order; sorted only when finalized
    members: Vec<Candidate>,
}

impl TopK {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            members: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Held candidates in insertion order
    pub fn members(&self) -> &[Candidate] {
        &self.members
    }

    /// Largest distance currently held
    pub fn max_distance(&self) -> Option<f32> {
        self.worst().map(|idx| self.members[idx].distance)
    }

    /// Offer a candidate; returns whether it was retained
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        if self.capacity == 0 {
            return false;
        }
        if self.members.len() < self.capacity {
            self.members.push(candidate);
            return true;
        }

        let Some(worst) = self.worst() else {
            return false;
        };
        if candidate.distance <= self.members[worst].distance {
            self.members.remove(worst);
            self.members.push(candidate);
            true
        } else {
            false
        }
    }

    /// Held candidates ordered by distance ascending, stable on ties
    #[must_use]
    pub fn finalize(self) -> Vec<Candidate> {
        let mut members = self.members;
        members.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        members
    }

    // Index of the earliest inserted member holding the maximum distance
    fn worst(&self) -> Option<usize> {
        let mut worst: Option<usize> = None;
        for (idx, member) in self.members.iter().enumerate() {
            match worst {
                Some(w) if member.distance <= self.members[w].distance => {}
                _ => worst = Some(idx),
            }
        }
        worst
    }
}

impl Default for TopK {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(name: &str, distance: f32) -> Candidate {
        Candidate {
            name: name.to_string(),
            category: "g".to_string(),
            image_path: format!("{}.jpg", name),
            distance,
        }
    }

    fn names(members: &[Candidate]) -> Vec<&str> {
        members.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_fills_unconditionally_below_capacity() {
        let mut topk = TopK::new(3);
        assert!(topk.offer(cand("a", 5.0)));
        assert!(topk.offer(cand("b", 9.0)));
        assert!(topk.offer(cand("c", 1.0)));
        assert_eq!(topk.len(), 3);
        assert_eq!(topk.max_distance(), Some(9.0));
    }

    #[test]
    fn test_evicts_maximum_for_closer_candidate() {
        let mut topk = TopK::new(2);
        topk.offer(cand("a", 0.5));
        topk.offer(cand("b", 0.9));
        assert!(topk.offer(cand("c", 0.1)));
        assert_eq!(names(&topk.finalize()), vec!["c", "a"]);
    }

    #[test]
    fn test_discards_farther_candidate() {
        let mut topk = TopK::new(2);
        topk.offer(cand("a", 0.5));
        topk.offer(cand("b", 0.9));
        assert!(!topk.offer(cand("c", 1.5)));
        assert_eq!(names(topk.members()), vec!["a", "b"]);
    }

    #[test]
    fn test_equal_to_maximum_replaces_it() {
        let mut topk = TopK::new(2);
        topk.offer(cand("a", 0.5));
        topk.offer(cand("b", 0.9));
        assert!(topk.offer(cand("c", 0.9)));
        assert_eq!(names(topk.members()), vec!["a", "c"]);
        assert_eq!(topk.max_distance(), Some(0.9));
    }

    #[test]
    fn test_tied_maxima_evict_earliest_inserted() {
        let mut topk = TopK::new(3);
        topk.offer(cand("a", 0.9));
        topk.offer(cand("b", 0.2));
        topk.offer(cand("c", 0.9));
        assert!(topk.offer(cand("d", 0.1)));
        assert_eq!(names(topk.members()), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_finalize_sorts_ascending_and_is_stable() {
        let mut topk = TopK::new(4);
        topk.offer(cand("a", 0.3));
        topk.offer(cand("b", 0.1));
        topk.offer(cand("c", 0.3));
        topk.offer(cand("d", 0.2));
        assert_eq!(names(&topk.finalize()), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut topk = TopK::new(0);
        assert!(!topk.offer(cand("a", 0.0)));
        assert!(topk.is_empty());
        assert_eq!(topk.max_distance(), None);
    }

    #[test]
    fn test_keeps_k_smallest_of_many() {
        let mut topk = TopK::default();
        // Offer 15 candidates in a scrambled order
        for i in [7, 14, 0, 3, 11, 5, 9, 1, 13, 2, 8, 12, 4, 10, 6] {
            topk.offer(cand(&format!("e{}", i), i as f32));
        }
        let kept = topk.finalize();
        assert_eq!(kept.len(), DEFAULT_TOP_K);
        let distances: Vec<f32> = kept.iter().map(|c| c.distance).collect();
        assert_eq!(distances, (0..10).map(|i| i as f32).collect::<Vec<_>>());
    }
}
