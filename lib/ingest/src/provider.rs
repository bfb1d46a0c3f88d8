//! Embedding side of the input: which profile images exist, and which of
//! them yield an embedding.
//!
//! Images live at `<root>/<group>/<name>/<file>.{jpg,png}`. Inference itself
//! is outside this crate; an [`EmbeddingProvider`] only has to answer "what is
//! the embedding of this image", or `None` when no face was found.

use ahash::AHashMap;
use lookalike_core::{Embedding, Entity, Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::EmbeddingConfig;

const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// One profile image found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub name: String,
    pub category: String,
    pub path: PathBuf,
}

pub trait EmbeddingProvider {
    /// Embedding for one image; `Ok(None)` when no face was detected
    fn embed(&self, image: &Path) -> Result<Option<Embedding>>;
}

/// Embeddings computed ahead of time, keyed by image path relative to the
/// input root with `/` separators
#[derive(Debug, Clone)]
pub struct PrecomputedEmbeddings {
    root: PathBuf,
    vectors: AHashMap<String, Embedding>,
}

impl PrecomputedEmbeddings {
    pub fn new<P: AsRef<Path>>(root: P, vectors: AHashMap<String, Embedding>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            vectors,
        }
    }

    /// Read the JSON object at `config.source`
    pub fn open<P: AsRef<Path>>(config: &EmbeddingConfig, root: P) -> Result<Self> {
        config.validate()?;
        if !config.source.exists() {
            return Err(Error::NotFound(config.source.display().to_string()));
        }

        info!(
            "Loading embeddings from {:?} (image size {}, margin {}, gpu memory fraction {})",
            config.source, config.image_size, config.margin, config.gpu_memory_fraction
        );
        let data = fs::read(&config.source)?;
        let vectors: AHashMap<String, Embedding> = serde_json::from_slice(&data)?;
        info!("Loaded {} embeddings", vectors.len());

        Ok(Self::new(root, vectors))
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn key(&self, image: &Path) -> String {
        let relative = image.strip_prefix(&self.root).unwrap_or(image);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl EmbeddingProvider for PrecomputedEmbeddings {
    fn embed(&self, image: &Path) -> Result<Option<Embedding>> {
        Ok(self
            .vectors
            .get(&self.key(image))
            .filter(|e| !e.is_empty())
            .cloned())
    }
}

/// List every profile image under `root`, one per entity folder
///
/// The group is the lower-cased group folder name. When an entity folder
/// holds several images, the first in name order is used.
pub fn discover_images<P: AsRef<Path>>(root: P) -> Result<Vec<ImageEntry>> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(Error::NotFound(root.display().to_string()));
    }

    let mut entries = Vec::new();
    for group_dir in sorted_dirs(root)? {
        let category = file_name(&group_dir).to_lowercase();
        for entity_dir in sorted_dirs(&group_dir)? {
            let name = file_name(&entity_dir);
            let mut images = sorted_images(&entity_dir)?;
            if images.is_empty() {
                continue;
            }
            if images.len() > 1 {
                warn!(
                    "{} images for {} in {:?}, using {:?}",
                    images.len(),
                    name,
                    entity_dir,
                    images[0]
                );
            }
            entries.push(ImageEntry {
                name,
                category: category.clone(),
                path: images.swap_remove(0),
            });
        }
    }
    Ok(entries)
}

/// Build the ranking batch; images without an embedding are logged and left out
pub fn collect_entities<P, E>(root: P, provider: &E) -> Result<Vec<Entity>>
where
    P: AsRef<Path>,
    E: EmbeddingProvider + ?Sized,
{
    let images = discover_images(root)?;
    info!("Calculating embeddings for {} images...", images.len());

    let mut entities = Vec::with_capacity(images.len());
    for image in images {
        match provider.embed(&image.path)? {
            Some(embedding) => entities.push(Entity::new(
                image.name,
                image.category,
                image.path.display().to_string(),
                embedding,
            )),
            None => warn!("can't detect face, skipping {:?}", image.path),
        }
    }
    Ok(entities)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sorted_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn sorted_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
            .unwrap_or(false);
        if is_image && path.is_file() {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}
