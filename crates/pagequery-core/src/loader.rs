//! Prefetch pass-through to the data-loading subsystem
//!
//! The loader itself (fetching, caching, indexing page data) lives outside
//! this crate. View code only ever asks it to enqueue a pathname, and the
//! request is fire-and-forget.

use pagequery_core_types::schema::OP_PREFETCH_PATHNAME;
use std::sync::{Arc, Mutex, OnceLock};

use crate::errors::{QueryError, Result};
use crate::{log_op_end, log_op_error, log_op_start};

/// Boundary of the data-loading subsystem
pub trait PageLoader: Send + Sync {
    /// Schedule data for `pathname` to be fetched ahead of navigation
    fn enqueue(&self, pathname: &str);
}

/// Prefetch entry point bound to one loader
#[derive(Clone)]
pub struct Prefetcher {
    loader: Arc<dyn PageLoader>,
}

impl Prefetcher {
    pub fn new(loader: Arc<dyn PageLoader>) -> Self {
        Self { loader }
    }

    /// Forward `pathname` to the loader
    pub fn prefetch(&self, pathname: &str) {
        log_op_start!(OP_PREFETCH_PATHNAME, pathname = pathname);
        self.loader.enqueue(pathname);
        log_op_end!(OP_PREFETCH_PATHNAME, duration_ms = 0u64, pathname = pathname);
    }
}

impl std::fmt::Debug for Prefetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prefetcher").finish_non_exhaustive()
    }
}

static PROCESS_PREFETCHER: OnceLock<Prefetcher> = OnceLock::new();

/// Install the process-wide loader
///
/// Returns `false` if a loader was already installed; the first one stays.
pub fn install_loader(loader: Arc<dyn PageLoader>) -> bool {
    let installed = PROCESS_PREFETCHER.set(Prefetcher::new(loader)).is_ok();
    if !installed {
        tracing::warn!("page loader already installed; keeping the existing one");
    }
    installed
}

/// The process-wide prefetcher, once a loader has been installed
pub fn prefetcher() -> Option<&'static Prefetcher> {
    PROCESS_PREFETCHER.get()
}

/// Ask the process-wide loader to prefetch data for `pathname`
///
/// # Errors
///
/// Returns `LoaderUnavailable` if no loader has been installed.
pub fn prefetch_pathname(pathname: &str) -> Result<()> {
    match prefetcher() {
        Some(prefetcher) => {
            prefetcher.prefetch(pathname);
            Ok(())
        }
        None => {
            let err = QueryError::LoaderUnavailable {
                pathname: pathname.to_string(),
            };
            log_op_error!(OP_PREFETCH_PATHNAME, &err, duration_ms = 0u64, pathname = pathname);
            Err(err)
        }
    }
}

/// Loader that records enqueued pathnames, in order and without duplicates
///
/// Suitable for build harnesses that batch prefetches, and for tests.
#[derive(Debug, Default)]
pub struct QueueLoader {
    queue: Mutex<Vec<String>>,
}

impl QueueLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pathnames enqueued so far
    pub fn pending(&self) -> Vec<String> {
        self.queue.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Take every queued pathname, leaving the queue empty
    pub fn drain(&self) -> Vec<String> {
        self.queue
            .lock()
            .map(|mut q| std::mem::take(&mut *q))
            .unwrap_or_default()
    }
}

impl PageLoader for QueueLoader {
    fn enqueue(&self, pathname: &str) {
        match self.queue.lock() {
            Ok(mut queue) => {
                if !queue.iter().any(|queued| queued == pathname) {
                    queue.push(pathname.to_string());
                }
            }
            Err(_) => {
                tracing::warn!(pathname, "prefetch queue poisoned; dropping enqueue");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefetcher_forwards_to_loader() {
        let loader = Arc::new(QueueLoader::new());
        let prefetcher = Prefetcher::new(loader.clone());

        prefetcher.prefetch("/blog/");
        prefetcher.prefetch("/about/");

        assert_eq!(loader.pending(), vec!["/blog/", "/about/"]);
    }

    #[test]
    fn test_queue_loader_deduplicates_and_drains() {
        let loader = QueueLoader::new();
        loader.enqueue("/a/");
        loader.enqueue("/a/");
        loader.enqueue("/b/");

        assert_eq!(loader.drain(), vec!["/a/", "/b/"]);
        assert!(loader.pending().is_empty());
    }

    #[test]
    fn test_poisoned_queue_drops_enqueue_with_warning() {
        use tracing_subscriber::layer::SubscriberExt;

        let (layer, capture) = crate::logging_facility::test_capture::TestCaptureLayer::new();
        let loader = Arc::new(QueueLoader::new());
        let poisoner = loader.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.queue.lock().unwrap();
            panic!("poison the queue");
        })
        .join();

        tracing::subscriber::with_default(tracing_subscriber::registry().with(layer), || {
            loader.enqueue("/poisoned-queue/");
        });

        assert!(loader.pending().is_empty());
        assert!(capture.events().iter().any(|e| {
            e.level == tracing::Level::WARN && e.field("pathname") == Some("/poisoned-queue/")
        }));
    }
}
