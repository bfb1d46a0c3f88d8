//! Read-only lookup over a persisted ranking.

use lookalike_core::{IdolRecord, Result};
use std::collections::BTreeMap;
use std::io::Write;

use crate::store::ResultStore;

pub struct QueryService {
    records: BTreeMap<String, IdolRecord>,
}

impl QueryService {
    pub fn new(records: BTreeMap<String, IdolRecord>) -> Self {
        Self { records }
    }

    /// Load the artifact behind `store`; a missing artifact is an error
    pub fn open(store: &ResultStore) -> Result<Self> {
        Ok(Self::new(store.load()?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&IdolRecord> {
        self.records.get(name)
    }

    /// Records for `names` in request order; unknown names are skipped
    pub fn lookup<S: AsRef<str>>(&self, names: &[S]) -> Vec<&IdolRecord> {
        names
            .iter()
            .filter_map(|name| self.records.get(name.as_ref()))
            .collect()
    }

    /// Render every known record among `names`; returns how many were written
    pub fn render<S: AsRef<str>, W: Write>(&self, names: &[S], out: &mut W) -> Result<usize> {
        let found = self.lookup(names);
        for record in &found {
            render_record(record, out)?;
        }
        Ok(found.len())
    }
}

/// Human-readable summary followed by the record as pretty JSON
pub fn render_record<W: Write>(record: &IdolRecord, out: &mut W) -> Result<()> {
    writeln!(out, "name: {} group: {}", record.name, record.category)?;

    writeln!(out, "  top")?;
    for (group, m) in &record.top_by_category {
        writeln!(out, "  group: {}", group)?;
        writeln!(out, "  image_url: {}", m.image_path)?;
        writeln!(out, "  similarity {}", m.similarity)?;
    }

    writeln!(out, "  top 10")?;
    for m in &record.top_k {
        writeln!(out, "  name: {}", m.name)?;
        writeln!(out, "  image_url: {}", m.image_path)?;
        writeln!(out, "  similarity {}", m.similarity)?;
    }

    serde_json::to_writer_pretty(&mut *out, record)?;
    writeln!(out)?;
    Ok(())
}
