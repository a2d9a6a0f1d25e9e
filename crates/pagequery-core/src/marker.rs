//! Query-declaration markers
//!
//! `graphql!(...)` and [`graphql`] exist only for the build transform, which
//! replaces each invocation with the numeric identifier of the extracted
//! query document. If either is still present when the program runs, the
//! build is misconfigured.

use std::convert::Infallible;

use crate::errors::{QueryError, Result};

/// Query source as written in a view, before the build transform
///
/// The transform recognises this type, extracts `source`, and rewrites the
/// surrounding expression to the minted identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryTemplate {
    source: &'static str,
}

impl QueryTemplate {
    pub const fn new(source: &'static str) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Runtime evaluation of an untransformed template
    ///
    /// # Errors
    ///
    /// Always returns `MisconfiguredBuild`.
    pub fn evaluate(&self) -> Result<Infallible> {
        graphql(self.source)
    }
}

/// Runtime body of the query-declaration marker
///
/// # Errors
///
/// Always returns `MisconfiguredBuild`, whatever it is called with.
pub fn graphql(_source: &str) -> Result<Infallible> {
    tracing::error!(op = "graphql", "query-declaration marker reached at runtime");
    Err(QueryError::MisconfiguredBuild)
}

/// Query-declaration marker in expression position
///
/// The build transform substitutes the identifier literal. Reaching the
/// expansion at runtime panics with the misconfiguration diagnostic.
#[macro_export]
macro_rules! graphql {
    ($($source:tt)*) => {
        ::core::unreachable!("{}", $crate::errors::QueryError::MisconfiguredBuild)
    };
}
