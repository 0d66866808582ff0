//! Artwork and tag enrichment for audio items.
//!
//! `Enricher` picks the queue items that still need a lookup, reads their
//! tags off the UI thread, asks an `ArtworkCatalog` for cover art and sends
//! the results back as `UPDATE_MEDIA_INFO` actions. Items are processed in
//! small concurrent batches and at most once per session.

mod catalog;
mod tags;

pub use catalog::*;
pub use tags::*;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::Sender;

use tokio::task::JoinSet;

use crate::queue::{ItemId, QueueAction, QueueItem, SourceHandle, SourceRegistry};

/// Extensions whose files are looked up.
pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "m4a", "aac", "flac", "wav"];

/// A single item scheduled for lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichJob {
    pub index: usize,
    pub id: ItemId,
    pub source: SourceHandle,
    pub path: PathBuf,
}

pub struct Enricher<C> {
    catalog: Arc<C>,
    countries: Arc<[String]>,
    batch_size: usize,
    processed: HashSet<SourceHandle>,
    tx: Sender<QueueAction>,
}

impl<C: ArtworkCatalog + 'static> Enricher<C> {
    pub fn new(
        catalog: C,
        countries: Vec<String>,
        batch_size: usize,
        tx: Sender<QueueAction>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            countries: countries.into(),
            batch_size: batch_size.max(1),
            processed: HashSet::new(),
            tx,
        }
    }

    /// Items of `queue` that need a lookup. Returned items are marked as
    /// processed, so a later call never yields them again.
    pub fn pending(&mut self, queue: &[QueueItem], sources: &SourceRegistry) -> Vec<EnrichJob> {
        let mut jobs = Vec::new();
        for (index, item) in queue.iter().enumerate() {
            if item.artwork_url.is_some()
                || !AUDIO_EXTENSIONS.contains(&item.extension.as_str())
                || self.processed.contains(&item.source)
            {
                continue;
            }
            let Some(path) = sources.resolve(item.source) else {
                continue;
            };
            self.processed.insert(item.source);
            jobs.push(EnrichJob {
                index,
                id: item.id,
                source: item.source,
                path: path.to_path_buf(),
            });
        }
        jobs
    }

    /// Schedule lookups for the pending items of `queue` on `rt`.
    /// Returns the number of items scheduled.
    pub fn spawn(
        &mut self,
        rt: &tokio::runtime::Handle,
        queue: &[QueueItem],
        sources: &SourceRegistry,
    ) -> usize {
        let jobs = self.pending(queue, sources);
        let n = jobs.len();
        if n > 0 {
            tracing::debug!(items = n, "scheduling artwork lookups");
            rt.spawn(run_jobs(
                Arc::clone(&self.catalog),
                Arc::clone(&self.countries),
                jobs,
                self.batch_size,
                self.tx.clone(),
            ));
        }
        n
    }
}

/// Process `jobs` in batches of `batch_size`, sending each result on `tx`.
pub async fn run_jobs<C: ArtworkCatalog + 'static>(
    catalog: Arc<C>,
    countries: Arc<[String]>,
    jobs: Vec<EnrichJob>,
    batch_size: usize,
    tx: Sender<QueueAction>,
) {
    for batch in jobs.chunks(batch_size.max(1)) {
        let mut set = JoinSet::new();
        for job in batch.iter().cloned() {
            let catalog = Arc::clone(&catalog);
            let countries = Arc::clone(&countries);
            set.spawn(async move { enrich_one(catalog.as_ref(), &countries, job).await });
        }
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(Some(action)) => {
                    if tx.send(action).is_err() {
                        tracing::debug!("UI gone, dropping artwork results");
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "artwork task failed"),
            }
        }
    }
}

/// Look up one item. `None` when there is nothing to report.
pub async fn enrich_one<C: ArtworkCatalog>(
    catalog: &C,
    countries: &[String],
    job: EnrichJob,
) -> Option<QueueAction> {
    let path = job.path.clone();
    let tags = match tokio::task::spawn_blocking(move || read_tags(&path)).await {
        Ok(Ok(tags)) => tags,
        Ok(Err(e)) => {
            tracing::warn!(item = %job.id, error = %e, "could not read tags");
            return None;
        }
        Err(e) => {
            tracing::warn!(item = %job.id, error = %e, "tag reader panicked");
            return None;
        }
    };
    let metadata = tags.filter(|m| !m.is_empty())?;

    let artwork_url = if metadata.artist.is_some() || metadata.album.is_some() {
        find_artwork(
            catalog,
            countries,
            metadata.artist.as_deref(),
            metadata.album.as_deref(),
        )
        .await
    } else {
        None
    };
    if artwork_url.is_none() {
        tracing::debug!(item = %job.id, "no artwork found");
    }

    Some(QueueAction::UpdateMediaInfo {
        index: job.index,
        id: job.id,
        artwork_url,
        metadata: Some(metadata),
    })
}
