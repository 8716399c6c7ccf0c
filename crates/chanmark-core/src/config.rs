//! Runtime policy for bookmark collections.
//!
//! The per-channel ceiling is a caller-side policy: [`Bookmark::is_valid`]
//! never looks at it. Values come from the environment with defaults from
//! [`crate::defaults`]:
//!
//! - `CHANMARK_MAX_BOOKMARKS_PER_CHANNEL` (default: 50)
//! - `CHANMARK_ENFORCE_CHANNEL_LIMIT` (default: true)
//!
//! [`Bookmark::is_valid`]: crate::models::Bookmark::is_valid

use std::env;
use tracing::debug;

use crate::defaults::{
    ENV_ENFORCE_CHANNEL_LIMIT, ENV_MAX_BOOKMARKS_PER_CHANNEL, MAX_BOOKMARKS_PER_CHANNEL,
};
use crate::error::{Error, Result};

/// Collection-level bookmark policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkPolicy {
    /// Maximum live bookmarks in one channel.
    pub max_per_channel: usize,
    /// When false, [`BookmarkPolicy::check_channel_capacity`] always passes.
    pub enforce_channel_limit: bool,
}

impl Default for BookmarkPolicy {
    fn default() -> Self {
        Self {
            max_per_channel: MAX_BOOKMARKS_PER_CHANNEL,
            enforce_channel_limit: true,
        }
    }
}

impl BookmarkPolicy {
    /// Read the policy from environment variables.
    ///
    /// A ceiling that is not a positive integer is a configuration error
    /// rather than a silent fallback.
    pub fn from_env() -> Result<Self> {
        let max_per_channel = match env::var(ENV_MAX_BOOKMARKS_PER_CHANNEL) {
            Ok(raw) => parse_ceiling(&raw)?,
            Err(_) => MAX_BOOKMARKS_PER_CHANNEL,
        };
        let enforce_channel_limit = parse_bool_env(ENV_ENFORCE_CHANNEL_LIMIT, true);

        let policy = Self {
            max_per_channel,
            enforce_channel_limit,
        };
        debug!(
            subsystem = "model",
            component = "config",
            max_per_channel = policy.max_per_channel,
            enforce_channel_limit = policy.enforce_channel_limit,
            "Bookmark policy loaded"
        );
        Ok(policy)
    }

    /// Check that one more bookmark fits in a channel holding `existing`
    /// live bookmarks.
    pub fn check_channel_capacity(&self, existing: usize) -> Result<()> {
        if self.enforce_channel_limit && existing >= self.max_per_channel {
            return Err(Error::InvalidInput(format!(
                "channel already holds {} bookmarks (max {})",
                existing, self.max_per_channel
            )));
        }
        Ok(())
    }
}

fn parse_ceiling(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::Config(format!(
            "{} must be a positive integer, got {:?}",
            ENV_MAX_BOOKMARKS_PER_CHANNEL, raw
        ))),
    }
}

/// Parses a boolean environment variable with a default fallback.
///
/// Recognizes "true", "1", "yes", "on" and "false", "0", "no", "off"
/// (case-insensitive). Anything else returns the default.
fn parse_bool_env(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|val| match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}
