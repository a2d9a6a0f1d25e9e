//! pagequery Core - runtime resolution of compiled page queries
//!
//! A build transform replaces every query template in view code with a
//! numeric identifier. At render time this crate maps those identifiers to
//! data that has already been fetched:
//!
//! - Identifier guard rejecting handles that never went through the transform
//! - Context registry choosing between the shared default channel and an
//!   isolated per-request server channel
//! - Data resolver behind the imperative `use_static_query` subscription
//! - `StaticQuery` render adapter with a loading placeholder
//! - `graphql` marker, prefetch pass-through, configuration, error and
//!   logging facilities

pub mod config;
pub mod context;
pub mod errors;
pub mod loader;
pub mod logging_facility;
pub mod marker;
pub mod query_id;
pub mod render;
pub mod resolver;
pub mod snapshot;

#[doc(hidden)]
pub use pagequery_core_types as core_types;
#[doc(hidden)]
pub use tracing as __tracing;

// Re-export commonly used types
pub use config::RuntimeConfig;
pub use context::{
    ActiveSnapshot, ContextChannel, ContextRegistry, EnvironmentCapabilities, RenderMode,
    RenderScope, ServerChannel,
};
pub use errors::{ExError, ExErrorKind, QueryError, Result};
pub use loader::{install_loader, prefetch_pathname, PageLoader, Prefetcher, QueueLoader};
pub use marker::{graphql, QueryTemplate};
pub use query_id::QueryId;
pub use render::{Rendered, StaticQuery, LOADING_PLACEHOLDER};
pub use resolver::{diagnose, resolve, use_static_query};
pub use snapshot::{DataSnapshot, Payload, QueryResult};
