//! Declarative `StaticQuery` render adapter
//!
//! Unlike [`use_static_query`](crate::resolver::use_static_query), the adapter
//! may legitimately run before data arrives and renders a loading placeholder
//! in that case. Nothing is retained between mounts.

use std::fmt;

use pagequery_core_types::schema::OP_MOUNT_STATIC_QUERY;

use crate::context::RenderScope;
use crate::errors::{QueryError, Result};
use crate::log_op_error;
use crate::snapshot::{Payload, QueryResult};

/// Markup rendered while a query has no data yet
pub const LOADING_PLACEHOLDER: &str = "<div>Loading (StaticQuery)</div>";

type RenderFn<'a, V> = Box<dyn Fn(&Payload) -> V + Send + Sync + 'a>;

/// Outcome of one mount
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<V> {
    /// The render function ran with the resolved payload
    Resolved(V),
    /// No payload available; the placeholder stands in
    Pending,
}

impl<V> Rendered<V> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Rendered::Pending)
    }

    pub fn into_resolved(self) -> Option<V> {
        match self {
            Rendered::Resolved(view) => Some(view),
            Rendered::Pending => None,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Rendered<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Resolved(view) => view.fmt(f),
            Rendered::Pending => f.write_str(LOADING_PLACEHOLDER),
        }
    }
}

/// View node that renders a query's data through a caller-supplied function
///
/// # Example
///
/// ```
/// use pagequery_core::{ContextRegistry, DataSnapshot, EnvironmentCapabilities, QueryResult, StaticQuery};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let table = DataSnapshot::new().with_entry(7u64, QueryResult::new(json!({"title": "Blog"})));
/// let registry = ContextRegistry::new(EnvironmentCapabilities::default(), Arc::new(table));
/// let scope = registry.client_scope();
///
/// let node = StaticQuery::new("7").render(|data| format!("<h1>{}</h1>", data["title"].as_str().unwrap_or("")));
/// assert_eq!(node.mount(&scope).unwrap().to_string(), "<h1>Blog</h1>");
/// ```
pub struct StaticQuery<'a, V> {
    data: Option<&'a QueryResult>,
    query: String,
    render: Option<RenderFn<'a, V>>,
    children: Option<RenderFn<'a, V>>,
}

impl<'a, V> StaticQuery<'a, V> {
    /// Node for the compiled query `query`
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            data: None,
            query: query.into(),
            render: None,
            children: None,
        }
    }

    /// Supply the result directly instead of reading the ambient snapshot
    pub fn data(mut self, data: &'a QueryResult) -> Self {
        self.data = Some(data);
        self
    }

    /// Explicit render function; preferred over `children`
    pub fn render(mut self, render: impl Fn(&Payload) -> V + Send + Sync + 'a) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Children used as a render function
    pub fn children(mut self, children: impl Fn(&Payload) -> V + Send + Sync + 'a) -> Self {
        self.children = Some(Box::new(children));
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Render against the nearest default-channel snapshot of `scope`
    ///
    /// A directly supplied result takes precedence over the ambient lookup,
    /// even when it carries no data.
    ///
    /// # Errors
    ///
    /// Returns `MissingRenderFunction` if a payload resolved but neither
    /// `render` nor `children` was set. A missing payload is not an error.
    pub fn mount(&self, scope: &RenderScope<'_>) -> Result<Rendered<V>> {
        let payload = match self.data {
            Some(result) => result.payload(),
            None => scope
                .nearest_default()
                .get(&self.query)
                .and_then(QueryResult::payload),
        };

        let Some(payload) = payload else {
            tracing::debug!(query_id = %self.query, "static query pending");
            return Ok(Rendered::Pending);
        };

        match self.render.as_ref().or(self.children.as_ref()) {
            Some(render) => Ok(Rendered::Resolved(render(payload))),
            None => {
                let err = QueryError::MissingRenderFunction {
                    query_id: self.query.clone(),
                };
                log_op_error!(OP_MOUNT_STATIC_QUERY, &err, duration_ms = 0u64, query_id = %self.query);
                Err(err)
            }
        }
    }
}

impl<V> fmt::Debug for StaticQuery<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticQuery")
            .field("query", &self.query)
            .field("data", &self.data)
            .field("render", &self.render.is_some())
            .field("children", &self.children.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ContextRegistry, EnvironmentCapabilities};
    use crate::snapshot::DataSnapshot;
    use serde_json::json;
    use std::sync::Arc;

    fn registry_with(id: u64, payload: Payload) -> ContextRegistry {
        let table = DataSnapshot::new().with_entry(id, QueryResult::new(payload));
        ContextRegistry::new(EnvironmentCapabilities::default(), Arc::new(table))
    }

    #[test]
    fn test_direct_data_wins_over_ambient() {
        let registry = registry_with(1, json!("ambient"));
        let scope = registry.client_scope();
        let direct = QueryResult::new(json!("direct"));

        let node = StaticQuery::new("1")
            .data(&direct)
            .render(|p: &Payload| p.as_str().unwrap_or_default().to_string());
        assert_eq!(node.mount(&scope).unwrap(), Rendered::Resolved("direct".to_string()));
    }

    #[test]
    fn test_ambient_lookup_when_no_direct_data() {
        let registry = registry_with(1, json!("ambient"));
        let scope = registry.client_scope();

        let node = StaticQuery::new("1").render(|p: &Payload| p.clone());
        assert_eq!(node.mount(&scope).unwrap(), Rendered::Resolved(json!("ambient")));
    }

    #[test]
    fn test_direct_result_without_data_is_pending() {
        let registry = registry_with(1, json!("ambient"));
        let scope = registry.client_scope();
        let empty = QueryResult::empty();

        let node = StaticQuery::new("1").data(&empty).render(|p: &Payload| p.clone());
        assert!(node.mount(&scope).unwrap().is_pending());
    }

    #[test]
    fn test_render_preferred_over_children() {
        let registry = registry_with(2, json!(0));
        let scope = registry.client_scope();

        let node = StaticQuery::new("2")
            .children(|_: &Payload| "children")
            .render(|_: &Payload| "render");
        assert_eq!(node.mount(&scope).unwrap(), Rendered::Resolved("render"));

        let node = StaticQuery::new("2").children(|_: &Payload| "children");
        assert_eq!(node.mount(&scope).unwrap(), Rendered::Resolved("children"));
    }

    #[test]
    fn test_missing_render_function_only_fails_when_resolved() {
        let registry = registry_with(3, json!({"a": 1}));
        let scope = registry.client_scope();

        let resolved: StaticQuery<'_, String> = StaticQuery::new("3");
        assert_eq!(
            resolved.mount(&scope).unwrap_err(),
            QueryError::MissingRenderFunction {
                query_id: "3".to_string()
            }
        );

        let pending: StaticQuery<'_, String> = StaticQuery::new("4");
        assert!(pending.mount(&scope).unwrap().is_pending());
    }

    #[test]
    fn test_pending_displays_placeholder() {
        let rendered: Rendered<String> = Rendered::Pending;
        assert_eq!(rendered.to_string(), LOADING_PLACEHOLDER);
        assert_eq!(Rendered::Resolved("x").to_string(), "x");
    }

    #[test]
    fn test_innermost_provider_is_rendered() {
        let registry = registry_with(5, json!("registry"));
        let scope = registry.client_scope();
        let outer = scope.provide(Arc::new(
            DataSnapshot::new().with_entry(5u64, QueryResult::new(json!("outer"))),
        ));
        let inner = outer.provide(Arc::new(
            DataSnapshot::new().with_entry(5u64, QueryResult::new(json!("inner"))),
        ));

        let node = StaticQuery::new("5").render(|p: &Payload| p.clone());
        assert_eq!(node.mount(&inner).unwrap(), Rendered::Resolved(json!("inner")));
        assert_eq!(node.mount(&outer).unwrap(), Rendered::Resolved(json!("outer")));
        assert_eq!(node.mount(&scope).unwrap(), Rendered::Resolved(json!("registry")));

        let shadowed = inner.provide(Arc::new(DataSnapshot::new()));
        assert!(node.mount(&shadowed).unwrap().is_pending());
    }
}
