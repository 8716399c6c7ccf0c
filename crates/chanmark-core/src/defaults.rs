//! Centralized default constants for chanmark.
//!
//! **This module is the single source of truth** for shared limits and
//! defaults. Other modules and the CLI reference these constants instead of
//! defining their own magic numbers.

// =============================================================================
// BOOKMARK LIMITS
// =============================================================================

/// Maximum length of a bookmark display name, in Unicode scalar values.
pub const DISPLAY_NAME_MAX_RUNES: usize = 64;

/// Maximum length of a bookmark link or image URL, in Unicode scalar values.
pub const LINK_MAX_RUNES: usize = 1024;

/// Bookmarks allowed per channel. Enforced by callers, not by `is_valid`.
pub const MAX_BOOKMARKS_PER_CHANNEL: usize = 50;

/// Creator id stamped on file metadata owned by a bookmark.
pub const BOOKMARK_FILE_OWNER: &str = "bookmark";

// =============================================================================
// ETAG
// =============================================================================

/// Version prefix of every etag. Bumping it invalidates all client caches.
pub const ETAG_VERSION: &str = "1.0.0";

/// Delta component of list etags. Always zero for channel lists.
pub const ETAG_DELTA: i64 = 0;

/// Winner id reported for an empty list.
pub const ETAG_EMPTY_ID: &str = "0";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Env var overriding [`MAX_BOOKMARKS_PER_CHANNEL`].
pub const ENV_MAX_BOOKMARKS_PER_CHANNEL: &str = "CHANMARK_MAX_BOOKMARKS_PER_CHANNEL";

/// Env var toggling the per-channel ceiling check.
pub const ENV_ENFORCE_CHANNEL_LIMIT: &str = "CHANMARK_ENFORCE_CHANNEL_LIMIT";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_are_bit_exact() {
        assert_eq!(DISPLAY_NAME_MAX_RUNES, 64);
        assert_eq!(LINK_MAX_RUNES, 1024);
        assert_eq!(MAX_BOOKMARKS_PER_CHANNEL, 50);
    }

    #[test]
    fn test_etag_version_is_dotted() {
        assert_eq!(ETAG_VERSION.split('.').count(), 3);
    }
}
