//! Structured logging schema and field name constants for chanmark.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by the same names everywhere.
//! `tracing` macros take field names as literal tokens, so event call sites
//! spell these names out; the constants are used as keys wherever a field
//! map is built at runtime (CLI reports).
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, record skipped |
//! | INFO  | Lifecycle events (startup, command completion) |
//! | DEBUG | Rejections and decision points |
//! | TRACE | Per-record normalization, etag scans |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "model", "cli"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "validator", "lifecycle", "etag"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "is_valid", "pre_save", "set_original"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Bookmark id being operated on.
pub const BOOKMARK_ID: &str = "bookmark_id";

/// Channel id owning the bookmark.
pub const CHANNEL_ID: &str = "channel_id";

// ─── Validation fields ─────────────────────────────────────────────────────

/// Field that failed validation.
pub const FIELD: &str = "field";

/// Stable violation code.
pub const CODE: &str = "code";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Number of records in a scanned collection.
pub const RECORD_COUNT: &str = "record_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_match_event_literals() {
        // keep in sync with the literal keys in `trace!`/`debug!` call sites
        assert_eq!(SUBSYSTEM, "subsystem");
        assert_eq!(COMPONENT, "component");
        assert_eq!(OPERATION, "op");
        assert_eq!(BOOKMARK_ID, "bookmark_id");
        assert_eq!(CHANNEL_ID, "channel_id");
        assert_eq!(FIELD, "field");
        assert_eq!(CODE, "code");
        assert_eq!(RECORD_COUNT, "record_count");
    }
}
