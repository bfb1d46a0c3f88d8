//! All-pairs ranking of a complete batch.
//!
//! Ranking runs in two phases with distinct types. [`RankingEngine::accumulate`]
//! walks every unordered pair once, feeding both endpoints' [`TopK`] and
//! [`CategoryBest`] aggregators and the batch [`GlobalMin`]. Only the
//! resulting [`RawRanking`] can be turned into scored [`IdolRecord`]s, via
//! [`RawRanking::normalize`], once the global minimum is final.

use ahash::AHashSet;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::category::CategoryBest;
use crate::entity::{Candidate, Entity, IdolRecord};
use crate::error::{Error, Result};
use crate::similarity::{similarity, GlobalMin};
use crate::topk::{TopK, DEFAULT_TOP_K};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingConfig {
    /// Matches kept per entity
    pub top_k: usize,
}

impl RankingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Aggregation state for one source entity before scoring
#[derive(Debug, Clone)]
pub struct RawIdol {
    pub name: String,
    pub category: String,
    pub image_path: String,
    pub top_k: TopK,
    pub top_by_category: CategoryBest,
}

/// Output of the accumulation phase: raw distances only
#[derive(Debug, Clone)]
pub struct RawRanking {
    pub idols: Vec<RawIdol>,
    pub global_min: GlobalMin,
}

impl RawRanking {
    pub fn get(&self, name: &str) -> Option<&RawIdol> {
        self.idols.iter().find(|idol| idol.name == name)
    }

    /// Score every retained match against the final global minimum
    #[must_use]
    pub fn normalize(self) -> Ranking {
        let global_min = self.global_min.value();
        let score = |c: Candidate| {
            let s = similarity(c.distance, global_min);
            c.scored(s)
        };

        let mut records = BTreeMap::new();
        for idol in self.idols {
            debug!("[calculate similarity] {}", idol.name);
            let top_by_category = idol
                .top_by_category
                .finalize()
                .into_iter()
                .map(|(category, c)| (category, score(c)))
                .collect();
            let top_k = idol.top_k.finalize().into_iter().map(&score).collect();

            records.insert(
                idol.name.clone(),
                IdolRecord {
                    name: idol.name,
                    category: idol.category,
                    image_path: idol.image_path,
                    top_by_category,
                    top_k,
                },
            );
        }

        Ranking {
            records,
            global_min_distance: global_min,
        }
    }
}

/// Scored result of a full run, keyed by entity name
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub records: BTreeMap<String, IdolRecord>,
    pub global_min_distance: f32,
}

#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(config: RankingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Run both phases over a complete batch
    pub fn rank(&self, entities: &[Entity]) -> Result<Ranking> {
        Ok(self.accumulate(entities)?.normalize())
    }

    /// Exhaustive pass over all pairs, O(N² · D)
    ///
    /// Fails on duplicate names or embeddings of unequal dimension; nothing is
    /// returned for a partially processed batch.
    pub fn accumulate(&self, entities: &[Entity]) -> Result<RawRanking> {
        let mut seen = AHashSet::with_capacity(entities.len());
        for entity in entities {
            if !seen.insert(entity.name.as_str()) {
                return Err(Error::DuplicateEntity(entity.name.clone()));
            }
        }

        info!("Ranking {} entities (top {})", entities.len(), self.config.top_k);

        let mut idols: Vec<RawIdol> = entities
            .iter()
            .map(|e| RawIdol {
                name: e.name.clone(),
                category: e.category.clone(),
                image_path: e.image_path.clone(),
                top_k: TopK::new(self.config.top_k),
                top_by_category: CategoryBest::new(),
            })
            .collect();
        let mut global_min = GlobalMin::new();

        for (i, source) in entities.iter().enumerate() {
            debug!("[add idol] {}", source.name);
            for (j, target) in entities.iter().enumerate().skip(i + 1) {
                let distance = source.embedding.l2_distance(&target.embedding)?;
                global_min.observe(distance);

                // Offers reach each source in ascending target order
                offer(&mut idols[i], target.candidate(distance));
                offer(&mut idols[j], source.candidate(distance));
            }
        }

        info!(
            "Compared {} pairs, min distance {}",
            global_min.observed(),
            global_min.value()
        );

        Ok(RawRanking { idols, global_min })
    }
}

fn offer(idol: &mut RawIdol, candidate: Candidate) {
    idol.top_by_category.offer(candidate.clone());
    idol.top_k.offer(candidate);
}
