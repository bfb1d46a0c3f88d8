//! Profile image fetcher.
//!
//! A fixed pool of worker threads drains a bounded channel of [`FetchItem`]s.
//! The producer closes the channel once every item is queued, and each worker
//! exits when the channel is empty and closed. Failed downloads are logged and
//! counted; nothing is retried.

use crossbeam::channel;
use lookalike_core::{Error, Result};
use reqwest::Url;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::roster::FetchItem;

/// Source of remote bytes
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Fetch(format!("{}: HTTP {}", url, response.status())));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::Fetch(format!("{}: {}", url, e)))?;
        Ok(bytes.to_vec())
    }
}

/// Outcome counts of one fetch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
    pub saved: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl FetchReport {
    pub fn total(&self) -> usize {
        self.saved + self.failed + self.skipped
    }
}

#[derive(Default)]
struct Counters {
    saved: AtomicUsize,
    failed: AtomicUsize,
    skipped: AtomicUsize,
}

impl Counters {
    fn report(&self) -> FetchReport {
        FetchReport {
            saved: self.saved.load(Ordering::Acquire),
            failed: self.failed.load(Ordering::Acquire),
            skipped: self.skipped.load(Ordering::Acquire),
        }
    }
}

pub struct Fetcher<T: Transport> {
    transport: T,
    config: FetchConfig,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, config: FetchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// Download every item, blocking until all workers have finished
    pub fn run(&self, items: Vec<FetchItem>) -> FetchReport {
        let counters = Counters::default();
        let (tx, rx) = channel::bounded::<FetchItem>(self.config.queue_capacity);

        thread::scope(|s| {
            for worker_id in 0..self.config.workers {
                let rx = rx.clone();
                let counters = &counters;
                let spawned = thread::Builder::new()
                    .name(format!("fetch-worker-{}", worker_id))
                    .spawn_scoped(s, move || {
                        for item in rx.iter() {
                            self.process(worker_id, &item, counters);
                        }
                        debug!("fetch worker {} done", worker_id);
                    });
                if let Err(e) = spawned {
                    warn!("Failed to spawn fetch worker {}: {}", worker_id, e);
                }
            }
            drop(rx);

            let mut pending = items.into_iter();
            for item in pending.by_ref() {
                if tx.send(item).is_err() {
                    // Every worker is gone
                    counters.failed.fetch_add(1, Ordering::AcqRel);
                    break;
                }
            }
            counters.failed.fetch_add(pending.count(), Ordering::AcqRel);
            drop(tx);
        });

        let report = counters.report();
        info!(
            "Fetch finished: {} saved, {} failed, {} skipped",
            report.saved, report.failed, report.skipped
        );
        report
    }

    fn process(&self, worker_id: usize, item: &FetchItem, counters: &Counters) {
        match self.fetch_one(item) {
            Ok(Some(path)) => {
                debug!("worker {} saved {:?}", worker_id, path);
                counters.saved.fetch_add(1, Ordering::AcqRel);
            }
            Ok(None) => {
                counters.skipped.fetch_add(1, Ordering::AcqRel);
            }
            Err(e) => {
                warn!("[fail] {}: {}", item.member.image_url, e);
                counters.failed.fetch_add(1, Ordering::AcqRel);
            }
        }
    }

    fn fetch_one(&self, item: &FetchItem) -> Result<Option<PathBuf>> {
        let name = item.member.name.trim();
        let link = item.member.image_url.trim();
        if name.is_empty() || link.is_empty() {
            warn!("Skipping roster entry without name or link in {:?}", item.group_dir);
            return Ok(None);
        }

        let destination = destination(item)?;
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("[save] {} {}", name, destination.display());

        let bytes = self.transport.get(link)?;
        fs::write(&destination, bytes)?;
        Ok(Some(destination))
    }
}

/// `<group_dir>/<name>/<last segment of the URL path>`
pub fn destination(item: &FetchItem) -> Result<PathBuf> {
    let name = item.member.name.trim();
    if !is_plain_name(name) {
        return Err(Error::Fetch(format!("unsafe member name {:?}", name)));
    }

    let url = Url::parse(item.member.image_url.trim())
        .map_err(|e| Error::Fetch(format!("{}: {}", item.member.image_url, e)))?;
    let file_name = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(|s| s.trim().to_string())
        .filter(|s| is_plain_name(s))
        .ok_or_else(|| Error::Fetch(format!("no file name in {}", url)))?;

    Ok(item.group_dir.join(name).join(file_name))
}

// A single normal path component
fn is_plain_name(s: &str) -> bool {
    let mut components = Path::new(s).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
