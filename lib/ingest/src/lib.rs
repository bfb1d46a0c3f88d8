//! # Lookalike Ingest
//!
//! Everything that happens before ranking:
//!
//! - [`load_rosters`] and [`Fetcher`] - download profile images listed in each
//!   group's `members.json`
//! - [`discover_images`] - find one profile image per entity folder
//! - [`EmbeddingProvider`] and [`collect_entities`] - turn images into the
//!   ranking batch, leaving out images without a detectable face

pub mod config;
pub mod roster;
pub mod fetch;
pub mod provider;

pub use config::{EmbeddingConfig, FetchConfig, DEFAULT_INPUT_ROOT};
pub use roster::{load_rosters, FetchItem, Member, ROSTER_FILE};
pub use fetch::{destination, FetchReport, Fetcher, HttpTransport, Transport};
pub use provider::{collect_entities, discover_images, EmbeddingProvider, ImageEntry, PrecomputedEmbeddings};
