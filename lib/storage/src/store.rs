use atomicwrites::{AtomicFile, OverwriteBehavior};
use lookalike_core::{Error, IdolRecord, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default artifact name, relative to the working directory
pub const DEFAULT_ARTIFACT: &str = "lookalike.json";

/// Persisted entity → record mapping
///
/// Each `persist` replaces the whole artifact. The new content is written to
/// a temporary file next to the target and renamed over it, so readers see
/// either the previous artifact or the complete new one.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn persist(&self, records: &BTreeMap<String, IdolRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec(records)?;
        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| f.write_all(&data))
            .map_err(|e| match e {
                atomicwrites::Error::Internal(io) | atomicwrites::Error::User(io) => Error::Io(io),
            })?;

        info!("[save] {} ({} records)", self.path.display(), records.len());
        Ok(())
    }

    pub fn load(&self) -> Result<BTreeMap<String, IdolRecord>> {
        if !self.path.exists() {
            return Err(Error::NotFound(self.path.display().to_string()));
        }

        let data = fs::read(&self.path)?;
        let records: BTreeMap<String, IdolRecord> = serde_json::from_slice(&data)?;
        Ok(records)
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACT)
    }
}
