//! Context registry and render scopes
//!
//! Two channels carry snapshots to view code:
//!
//! - the **default channel**, a shared table handed to the registry when it is
//!   built, optionally shadowed by nested providers inside a scope;
//! - the **server channel**, which only exists when the host can isolate
//!   per-render state. Each server render scope brings its own snapshot, so
//!   one in-flight request can never observe another's data.
//!
//! The render mode is passed explicitly when a scope is opened; nothing is
//! inferred from the contents of shared state.

use pagequery_core_types::RequestContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::snapshot::DataSnapshot;

/// Capabilities reported by the host rendering environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentCapabilities {
    /// The host can create isolated per-render context
    pub isolated_render_context: bool,
    /// The host can run context subscriptions from view code
    pub subscriptions: bool,
}

impl Default for EnvironmentCapabilities {
    fn default() -> Self {
        Self {
            isolated_render_context: true,
            subscriptions: true,
        }
    }
}

/// Which channel a snapshot was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextChannel {
    Default,
    Server,
}

impl ContextChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextChannel::Default => "default",
            ContextChannel::Server => "server",
        }
    }
}

impl fmt::Display for ContextChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the current render pass is being produced
#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    /// Interactive rendering in a browser after hydration
    Client,
    /// Server-side rendering of one request, with that request's snapshot
    Server(Arc<DataSnapshot>),
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Client => "client",
            RenderMode::Server(_) => "server",
        }
    }
}

/// Handle for the server-scoped channel
///
/// Present on a registry only when the host supports isolated render
/// context. Snapshots themselves live on each server [`RenderScope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerChannel {
    name: &'static str,
}

impl ServerChannel {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Snapshot selected for a resolution, tagged with its channel
#[derive(Debug, Clone, Copy)]
pub struct ActiveSnapshot<'a> {
    pub channel: ContextChannel,
    pub snapshot: &'a DataSnapshot,
}

/// Holds both context channels for a process (or a test)
#[derive(Debug, Clone)]
pub struct ContextRegistry {
    default_channel: Arc<DataSnapshot>,
    server_channel: Option<ServerChannel>,
    capabilities: EnvironmentCapabilities,
}

impl ContextRegistry {
    /// Build a registry around an explicit default-channel table
    ///
    /// The server channel is created here, once, if the host supports it.
    pub fn new(capabilities: EnvironmentCapabilities, default_snapshot: Arc<DataSnapshot>) -> Self {
        let server_channel = capabilities
            .isolated_render_context
            .then_some(ServerChannel { name: "StaticQuery" });
        tracing::debug!(
            isolated_render_context = capabilities.isolated_render_context,
            subscriptions = capabilities.subscriptions,
            default_len = default_snapshot.len(),
            "context registry created"
        );
        Self {
            default_channel: default_snapshot,
            server_channel,
            capabilities,
        }
    }

    /// Registry whose default channel starts out empty
    pub fn with_empty_default(capabilities: EnvironmentCapabilities) -> Self {
        Self::new(capabilities, Arc::new(DataSnapshot::new()))
    }

    pub fn capabilities(&self) -> EnvironmentCapabilities {
        self.capabilities
    }

    /// The shared default-channel table
    pub fn default_channel(&self) -> &Arc<DataSnapshot> {
        &self.default_channel
    }

    /// The server channel, if the host supports one
    pub fn server_channel(&self) -> Option<&ServerChannel> {
        self.server_channel.as_ref()
    }

    /// Open a scope for client rendering
    pub fn client_scope(&self) -> RenderScope<'_> {
        RenderScope {
            registry: self,
            mode: RenderMode::Client,
            providers: Vec::new(),
            request: RequestContext::new(),
        }
    }

    /// Open a scope for one server request with its own snapshot
    pub fn server_scope(&self, snapshot: Arc<DataSnapshot>, request: RequestContext) -> RenderScope<'_> {
        RenderScope {
            registry: self,
            mode: RenderMode::Server(snapshot),
            providers: Vec::new(),
            request,
        }
    }
}

/// One render pass: a page render on the server or a hydrated client tree
#[derive(Debug, Clone)]
pub struct RenderScope<'r> {
    registry: &'r ContextRegistry,
    mode: RenderMode,
    providers: Vec<Arc<DataSnapshot>>,
    request: RequestContext,
}

impl<'r> RenderScope<'r> {
    pub fn registry(&self) -> &'r ContextRegistry {
        self.registry
    }

    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// Nested scope with `snapshot` provided on the default channel
    ///
    /// Lookups inside the returned scope see `snapshot` in place of any
    /// outer provider, the way a nearer ancestor shadows a farther one.
    pub fn provide(&self, snapshot: Arc<DataSnapshot>) -> RenderScope<'r> {
        let mut nested = self.clone();
        nested.providers.push(snapshot);
        nested
    }

    /// Nearest default-channel snapshot: innermost provider, else the
    /// registry's table
    pub fn nearest_default(&self) -> &DataSnapshot {
        self.providers
            .last()
            .map(Arc::as_ref)
            .unwrap_or_else(|| self.registry.default_channel.as_ref())
    }

    /// Select the snapshot the imperative subscription reads from
    ///
    /// The server channel wins when it exists and this scope is a server
    /// render holding a non-empty snapshot; otherwise the default channel.
    pub fn active_snapshot(&self) -> ActiveSnapshot<'_> {
        let active = match (&self.registry.server_channel, &self.mode) {
            (Some(_), RenderMode::Server(snapshot)) if !snapshot.is_empty() => ActiveSnapshot {
                channel: ContextChannel::Server,
                snapshot: snapshot.as_ref(),
            },
            _ => ActiveSnapshot {
                channel: ContextChannel::Default,
                snapshot: self.nearest_default(),
            },
        };
        tracing::trace!(
            channel = active.channel.as_str(),
            render_mode = self.mode.as_str(),
            snapshot_len = active.snapshot.len(),
            "active snapshot selected"
        );
        active
    }
}
