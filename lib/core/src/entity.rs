use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::vector::Embedding;

/// A member of the ranking batch: identity, grouping label and embedding
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub category: String,
    pub image_path: String,
    pub embedding: Embedding,
}

impl Entity {
    #[inline]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        image_path: impl Into<String>,
        embedding: Embedding,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            image_path: image_path.into(),
            embedding,
        }
    }

    /// Unscored match record pointing at this entity
    #[inline]
    #[must_use]
    pub fn candidate(&self, distance: f32) -> Candidate {
        Candidate {
            name: self.name.clone(),
            category: self.category.clone(),
            image_path: self.image_path.clone(),
            distance,
        }
    }
}

/// A match carrying only its raw distance; similarity is unknown until the
/// batch-wide minimum distance is final.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub category: String,
    pub image_path: String,
    pub distance: f32,
}

impl Candidate {
    /// Attach a similarity score, consuming the raw distance
    #[inline]
    #[must_use]
    pub fn scored(self, similarity: f64) -> ScoredMatch {
        ScoredMatch {
            name: self.name,
            category: self.category,
            image_path: self.image_path,
            similarity,
        }
    }
}

/// A normalized match as persisted and presented
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredMatch {
    pub name: String,
    #[serde(rename = "group")]
    pub category: String,
    #[serde(rename = "image_url")]
    pub image_path: String,
    pub similarity: f64,
}

/// Per-entity result: best match per group and the overall top-K
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdolRecord {
    pub name: String,
    #[serde(rename = "group")]
    pub category: String,
    #[serde(rename = "image_url")]
    pub image_path: String,
    /// Closest match within each group, keyed by group
    #[serde(rename = "top")]
    pub top_by_category: BTreeMap<String, ScoredMatch>,
    /// Closest matches overall, most similar first
    #[serde(rename = "top_10")]
    pub top_k: Vec<ScoredMatch>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scored_match_wire_names() {
        let m = ScoredMatch {
            name: "Sana".to_string(),
            category: "twice".to_string(),
            image_path: "data/profile/twice/Sana/sana.jpg".to_string(),
            similarity: 0.71,
        };
        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Sana",
                "group": "twice",
                "image_url": "data/profile/twice/Sana/sana.jpg",
                "similarity": 0.71,
            })
        );
    }

    #[test]
    fn test_idol_record_wire_names() {
        let record = IdolRecord {
            name: "Momo".to_string(),
            category: "twice".to_string(),
            image_path: "momo.jpg".to_string(),
            top_by_category: BTreeMap::new(),
            top_k: Vec::new(),
        };
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        for key in ["name", "group", "image_url", "top", "top_10"] {
            assert!(obj.contains_key(key), "missing key {}", key);
        }
        assert_eq!(obj.len(), 5);
    }

    #[test]
    fn test_candidate_scoring_keeps_identity() {
        let entity = Entity::new("Jihyo", "twice", "jihyo.png", Embedding::new(vec![0.0]));
        let scored = entity.candidate(0.4).scored(0.83);
        assert_eq!(scored.name, "Jihyo");
        assert_eq!(scored.category, "twice");
        assert_eq!(scored.image_path, "jihyo.png");
        assert_eq!(scored.similarity, 0.83);
    }
}
