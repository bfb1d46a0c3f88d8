//! # Lookalike Core
//!
//! Core library for lookalike ranking.
//!
//! This crate provides the data model and the ranking engine:
//!
//! - [`Embedding`] - Face embedding with Euclidean distance
//! - [`Entity`] - A batch member: name, group, image path and embedding
//! - [`TopK`] - Bounded set of the closest candidates per entity
//! - [`CategoryBest`] - Closest candidate per group per entity
//! - [`GlobalMin`] and [`similarity`] - Batch-relative similarity scoring
//! - [`RankingEngine`] - Exhaustive all-pairs pass producing [`IdolRecord`]s
//!
//! ## Example
//!
//! ```rust
//! use lookalike_core::{Embedding, Entity, RankingEngine};
//!
//! let batch = vec![
//!     Entity::new("Nayeon", "twice", "nayeon.jpg", Embedding::new(vec![0.0, 0.0])),
//!     Entity::new("Yeji", "itzy", "yeji.jpg", Embedding::new(vec![0.3, 0.4])),
//! ];
//! let ranking = RankingEngine::default().rank(&batch).unwrap();
//! assert_eq!(ranking.records["Nayeon"].top_k[0].name, "Yeji");
//! assert_eq!(ranking.records["Nayeon"].top_k[0].similarity, 1.0);
//! ```

pub mod vector;
pub mod entity;
pub mod error;
pub mod topk;
pub mod category;
pub mod similarity;
pub mod ranking;

pub use vector::{l2_distance, Embedding};
pub use entity::{Candidate, Entity, IdolRecord, ScoredMatch};
pub use error::{Error, Result};
pub use topk::{TopK, DEFAULT_TOP_K};
pub use category::CategoryBest;
pub use similarity::{similarity, GlobalMin};
pub use ranking::{Ranking, RankingConfig, RankingEngine, RawIdol, RawRanking};
