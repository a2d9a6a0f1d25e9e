//! Data resolution for the imperative subscription
//!
//! `use_static_query` is only called once the surrounding render has
//! established that data is ready, so a missing payload here is a pipeline
//! fault, never a "still loading" state.

use pagequery_core_types::schema::OP_USE_STATIC_QUERY;
use std::time::Instant;

use crate::context::RenderScope;
use crate::errors::{ExError, QueryError, Result};
use crate::query_id::{self, QueryId};
use crate::snapshot::{DataSnapshot, Payload};
use crate::{log_op_end, log_op_error, log_op_start};

/// Extract the payload for `id` from `snapshot`
///
/// # Errors
///
/// Returns `DataUnavailable` when the snapshot has no entry for `id`, or an
/// entry without data.
pub fn resolve<'a>(id: &QueryId, snapshot: &'a DataSnapshot) -> Result<&'a Payload> {
    snapshot
        .payload(id)
        .ok_or_else(|| QueryError::DataUnavailable {
            query_id: id.as_str().to_string(),
        })
}

/// Read the data for a compiled query from the active snapshot of `scope`
///
/// The handle is validated before any snapshot is touched.
///
/// # Errors
///
/// - `SubscriptionsUnsupported` if the host cannot run subscriptions
/// - `QueryNotCompiled` if `handle` is not a numeric identifier
/// - `DataUnavailable` if the active snapshot lacks a payload for it
///
/// # Example
///
/// ```
/// use pagequery_core::{use_static_query, ContextRegistry, DataSnapshot, EnvironmentCapabilities, QueryResult};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let table = DataSnapshot::new().with_entry(42u64, QueryResult::new(json!({"title": "Home"})));
/// let registry = ContextRegistry::new(EnvironmentCapabilities::default(), Arc::new(table));
/// let scope = registry.client_scope();
///
/// assert_eq!(use_static_query(&scope, "42").unwrap(), &json!({"title": "Home"}));
/// ```
pub fn use_static_query<'s>(scope: &'s RenderScope<'_>, handle: &str) -> Result<&'s Payload> {
    let started = Instant::now();
    let request_id = scope.request().request_id.as_str();
    let render_mode = scope.mode().as_str();
    log_op_start!(
        OP_USE_STATIC_QUERY,
        query_id = handle,
        render_mode = render_mode,
        request_id = request_id
    );

    let result = subscribe(scope, handle);
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => {
            log_op_end!(
                OP_USE_STATIC_QUERY,
                duration_ms = duration_ms,
                query_id = handle,
                request_id = request_id
            );
        }
        Err(err) => {
            log_op_error!(
                OP_USE_STATIC_QUERY,
                err,
                duration_ms = duration_ms,
                query_id = handle,
                request_id = request_id
            );
        }
    }
    result
}

fn subscribe<'s>(scope: &'s RenderScope<'_>, handle: &str) -> Result<&'s Payload> {
    if !scope.registry().capabilities().subscriptions {
        return Err(QueryError::SubscriptionsUnsupported);
    }
    let id = query_id::validate(handle)?;
    let active = scope.active_snapshot();
    tracing::debug!(
        query_id = id.as_str(),
        channel = active.channel.as_str(),
        "resolving static query"
    );
    resolve(&id, active.snapshot)
}

/// Structured diagnostic for `err`, stamped with the scope's correlation
pub fn diagnose(scope: &RenderScope<'_>, err: QueryError) -> ExError {
    let request = scope.request();
    let ex_err = ExError::from(err)
        .with_render_mode(scope.mode().as_str())
        .with_request_id(request.request_id.clone());
    match &request.trace_id {
        Some(trace_id) => ex_err.with_trace_id(trace_id.clone()),
        None => ex_err,
    }
}
