//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between the logging macros,
//! the error facility and the test capture layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Query resolution
pub const FIELD_QUERY_ID: &str = "query_id";
pub const FIELD_CHANNEL: &str = "channel";
pub const FIELD_RENDER_MODE: &str = "render_mode";
pub const FIELD_SNAPSHOT_LEN: &str = "snapshot_len";
pub const FIELD_PATHNAME: &str = "pathname";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Operation names
pub const OP_USE_STATIC_QUERY: &str = "use_static_query";
pub const OP_MOUNT_STATIC_QUERY: &str = "mount_static_query";
pub const OP_PREFETCH_PATHNAME: &str = "prefetch_pathname";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_QUERY_ID.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_op_names_are_distinct() {
        assert_ne!(OP_USE_STATIC_QUERY, OP_MOUNT_STATIC_QUERY);
        assert_ne!(OP_USE_STATIC_QUERY, OP_PREFETCH_PATHNAME);
    }
}
