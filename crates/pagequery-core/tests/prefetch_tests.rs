//! Process-wide loader installation
//!
//! Kept in its own test binary so the global loader starts uninstalled.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pagequery_core::loader::prefetcher;
use pagequery_core::{install_loader, prefetch_pathname, ExErrorKind, QueueLoader};
use std::sync::Arc;

#[test]
fn test_prefetch_lifecycle() {
    // Before installation the pass-through has nowhere to go
    let err = prefetch_pathname("/early/").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::LoaderUnavailable);
    assert!(prefetcher().is_none());

    let loader = Arc::new(QueueLoader::new());
    assert!(install_loader(loader.clone()));

    prefetch_pathname("/blog/").unwrap();
    prefetch_pathname("/about/").unwrap();
    prefetch_pathname("/blog/").unwrap();
    assert_eq!(loader.pending(), vec!["/blog/", "/about/"]);

    // A second loader does not replace the first
    let other = Arc::new(QueueLoader::new());
    assert!(!install_loader(other.clone()));
    prefetch_pathname("/contact/").unwrap();
    assert!(other.pending().is_empty());
    assert_eq!(loader.drain(), vec!["/blog/", "/about/", "/contact/"]);
}
