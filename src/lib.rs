//! # lookalike
//!
//! Rank a set of face embeddings by pairwise visual similarity.
//!
//! Every entity gets the ten most similar other entities plus its closest
//! match in each group. Similarity is relative to the smallest distance seen
//! anywhere in the batch, so the closest pair overall scores exactly `1.0`.
//!
//! ## Quick Start
//!
//! ```bash
//! # download profile images listed in data/profile/<group>/members.json
//! lookalike-fetch --input-root data/profile
//!
//! # rank every entity and write lookalike.json
//! lookalike --embeddings models/embeddings.json
//!
//! # show saved results
//! lookalike Nayeon Yeji
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use lookalike::prelude::*;
//!
//! let config = EmbeddingConfig::default();
//! let provider = PrecomputedEmbeddings::open(&config, DEFAULT_INPUT_ROOT).unwrap();
//! let batch = collect_entities(DEFAULT_INPUT_ROOT, &provider).unwrap();
//!
//! let ranking = RankingEngine::default().rank(&batch).unwrap();
//! ResultStore::default().persist(&ranking.records).unwrap();
//! ```
//!
//! ## Crate Structure
//!
//! - `lookalike-core` - Data model, distances, top-K and per-group aggregation, ranking engine
//! - `lookalike-storage` - Persisted results and lookup
//! - `lookalike-ingest` - Profile discovery, embedding providers, image fetcher

pub mod logging;

// Re-export core types
pub use lookalike_core::{
    Embedding, Entity, Candidate, ScoredMatch, IdolRecord,
    TopK, CategoryBest, GlobalMin, similarity,
    Ranking, RankingConfig, RankingEngine, RawRanking,
    Error, Result, DEFAULT_TOP_K,
};

// Re-export storage
pub use lookalike_storage::{QueryService, ResultStore, DEFAULT_ARTIFACT};

// Re-export ingest
pub use lookalike_ingest::{
    collect_entities, discover_images, load_rosters,
    EmbeddingConfig, EmbeddingProvider, PrecomputedEmbeddings,
    FetchConfig, FetchReport, Fetcher, HttpTransport, Transport,
    DEFAULT_INPUT_ROOT,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Embedding, Entity, IdolRecord, ScoredMatch,
        Ranking, RankingConfig, RankingEngine,
        Error, Result, DEFAULT_TOP_K,
        QueryService, ResultStore, DEFAULT_ARTIFACT,
        collect_entities, EmbeddingConfig, EmbeddingProvider, PrecomputedEmbeddings,
        DEFAULT_INPUT_ROOT,
    };
}
