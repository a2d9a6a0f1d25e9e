use pagequery_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using QueryError
pub type Result<T> = std::result::Result<T, QueryError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// handling, log assertions and error-boundary reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Resolution
    /// A raw string reached the subscription instead of a compiled identifier
    QueryNotCompiled,
    /// A compiled identifier has no payload in the active snapshot
    DataUnavailable,
    /// A query-declaration marker survived the build transform
    MisconfiguredBuild,

    // Host environment
    SubscriptionsUnsupported,
    MissingRenderFunction,
    LoaderUnavailable,

    // Configuration/IO
    InvalidConfig,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::QueryNotCompiled => "ERR_QUERY_NOT_COMPILED",
            ExErrorKind::DataUnavailable => "ERR_DATA_UNAVAILABLE",
            ExErrorKind::MisconfiguredBuild => "ERR_MISCONFIGURED_BUILD",
            ExErrorKind::SubscriptionsUnsupported => "ERR_SUBSCRIPTIONS_UNSUPPORTED",
            ExErrorKind::MissingRenderFunction => "ERR_MISSING_RENDER_FUNCTION",
            ExErrorKind::LoaderUnavailable => "ERR_LOADER_UNAVAILABLE",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the kind signals a broken build or data pipeline rather than
    /// a caller mistake
    pub fn is_pipeline_fault(&self) -> bool {
        matches!(
            self,
            ExErrorKind::DataUnavailable | ExErrorKind::MisconfiguredBuild | ExErrorKind::Internal
        )
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the render
/// context the failure was raised in.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    query_id: Option<String>,
    render_mode: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            query_id: None,
            render_mode: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add query identifier context
    pub fn with_query_id(mut self, id: impl Into<String>) -> Self {
        self.query_id = Some(id.into());
        self
    }

    /// Add render mode context
    pub fn with_render_mode(mut self, mode: impl Into<String>) -> Self {
        self.render_mode = Some(mode.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the query identifier context, if any
    pub fn query_id(&self) -> Option<&str> {
        self.query_id.as_deref()
    }

    /// Get the render mode context, if any
    pub fn render_mode(&self) -> Option<&str> {
        self.render_mode.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(query_id) = &self.query_id {
            write!(f, " (query_id: {})", query_id)?;
        }
        if let Some(mode) = &self.render_mode {
            write!(f, " (render_mode: {})", mode)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for query resolution
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    // ===== Resolution Errors =====
    /// The subscription received raw query text instead of a compiled identifier
    #[error(
        "use_static_query was called with a string but expects to be called using `graphql`. Try this:\n\n\
         use pagequery_core::{{graphql, use_static_query}};\n\n\
         use_static_query(&scope, graphql!(r#\"{query}\"#));\n"
    )]
    QueryNotCompiled { query: String },

    /// The identifier is valid but the active snapshot holds no payload for it
    #[error(
        "The result of this StaticQuery could not be fetched.\n\n\
         This is likely a bug in the data pipeline and if reloading the page does not fix it, \
         please open an issue against pagequery (query id: {query_id})"
    )]
    DataUnavailable { query_id: String },

    /// A `graphql` marker was executed at runtime
    #[error(
        "It appears like pagequery is misconfigured. `graphql!` calls are supposed to only be \
         evaluated at compile time, and then compiled away. Unfortunately, something went wrong \
         and the query was left in the compiled code.\n\n\
         Unless your site has a complex or custom build configuration this is likely a bug in \
         the build transform."
    )]
    MisconfiguredBuild,

    // ===== Host Environment Errors =====
    /// The host renderer cannot run context subscriptions
    #[error(
        "You're likely using a renderer that doesn't support context subscriptions\n\
         Please update the renderer to a version with subscription support to use the \
         use_static_query hook."
    )]
    SubscriptionsUnsupported,

    /// A resolved StaticQuery had neither `render` nor `children`
    #[error("StaticQuery for query {query_id} resolved but has neither a render nor a children function")]
    MissingRenderFunction { query_id: String },

    /// Prefetch requested before a page loader was installed
    #[error("No page loader installed; cannot prefetch {pathname}")]
    LoaderUnavailable { pathname: String },

    // ===== Configuration Errors =====
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl QueryError {
    /// Canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            QueryError::QueryNotCompiled { .. } => ExErrorKind::QueryNotCompiled,
            QueryError::DataUnavailable { .. } => ExErrorKind::DataUnavailable,
            QueryError::MisconfiguredBuild => ExErrorKind::MisconfiguredBuild,
            QueryError::SubscriptionsUnsupported => ExErrorKind::SubscriptionsUnsupported,
            QueryError::MissingRenderFunction { .. } => ExErrorKind::MissingRenderFunction,
            QueryError::LoaderUnavailable { .. } => ExErrorKind::LoaderUnavailable,
            QueryError::InvalidConfig { .. } => ExErrorKind::InvalidConfig,
            QueryError::Io { .. } => ExErrorKind::Io,
            QueryError::Serialization { .. } => ExErrorKind::Serialization,
            QueryError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

/// Conversion from QueryError to ExError
impl From<QueryError> for ExError {
    fn from(err: QueryError) -> Self {
        let base = ExError::new(err.kind()).with_message(err.to_string());
        match err {
            QueryError::QueryNotCompiled { query } => base
                .with_op("use_static_query")
                .with_query_id(query),
            QueryError::DataUnavailable { query_id } => base
                .with_op("use_static_query")
                .with_query_id(query_id),
            QueryError::MisconfiguredBuild => base.with_op("graphql"),
            QueryError::SubscriptionsUnsupported => base.with_op("use_static_query"),
            QueryError::MissingRenderFunction { query_id } => base
                .with_op("mount_static_query")
                .with_query_id(query_id),
            QueryError::LoaderUnavailable { .. } => base.with_op("prefetch_pathname"),
            QueryError::InvalidConfig { .. }
            | QueryError::Io { .. }
            | QueryError::Serialization { .. }
            | QueryError::Internal { .. } => base,
        }
    }
}

/// Conversion from serde_json::Error to QueryError
impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for QueryError {
    fn from(err: toml::de::Error) -> Self {
        QueryError::InvalidConfig {
            message: err.to_string(),
        }
    }
}
