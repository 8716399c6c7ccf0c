//! List freshness fingerprints (etags).
//!
//! A list etag is a cheap staleness check, not a content hash. It names the
//! record holding the newest timestamp, that timestamp, a fixed delta and the
//! list length:
//!
//! ```text
//! <ETAG_VERSION>.<winning id>.<winning timestamp>.<delta>.<count>
//! 1.0.0.x1f9q8c3....1706000000000.0.12
//! ```
//!
//! Known blind spots, kept on purpose: reordering records without touching a
//! timestamp yields the same etag, and so does dropping a record while another
//! one gets a newer timestamp that happens to win with the same count.

use std::fmt::Display;
use tracing::trace;

use crate::defaults::{ETAG_DELTA, ETAG_EMPTY_ID, ETAG_VERSION};
use crate::models::{Channel, ChannelList, ChannelListWithTeamData, ChannelWithTeamData};

/// Join the version prefix and `parts` with dots.
pub fn etag<I>(parts: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut tag = ETAG_VERSION.to_string();
    for part in parts {
        tag.push('.');
        tag.push_str(&part.to_string());
    }
    tag
}

/// A record that contributes to a list etag.
pub trait Freshness {
    /// Candidate timestamps, usually a fixed-size array.
    type Stamps: IntoIterator<Item = i64>;

    fn freshness_id(&self) -> &str;

    /// Candidate timestamps, in the order they are compared.
    fn freshness_stamps(&self) -> Self::Stamps;
}

/// Etag of a collection of records.
///
/// Scans once, keeping a running maximum over every candidate timestamp.
/// Only a strictly greater timestamp replaces the winner, so ties keep the
/// earliest record in scan order.
pub fn list_etag<T: Freshness>(records: &[T]) -> String {
    let mut id = ETAG_EMPTY_ID;
    let mut t: i64 = 0;

    for record in records {
        for stamp in record.freshness_stamps() {
            if stamp > t {
                t = stamp;
                id = record.freshness_id();
            }
        }
    }

    trace!(
        subsystem = "model",
        component = "etag",
        op = "list_etag",
        winning_id = id,
        winning_at = t,
        record_count = records.len(),
        "List etag computed"
    );

    etag([
        id.to_string(),
        t.to_string(),
        ETAG_DELTA.to_string(),
        records.len().to_string(),
    ])
}

impl Freshness for Channel {
    type Stamps = [i64; 2];

    fn freshness_id(&self) -> &str {
        &self.id
    }

    fn freshness_stamps(&self) -> [i64; 2] {
        [self.last_post_at, self.update_at]
    }
}

impl Freshness for ChannelWithTeamData {
    type Stamps = [i64; 3];

    fn freshness_id(&self) -> &str {
        &self.channel.id
    }

    fn freshness_stamps(&self) -> [i64; 3] {
        [
            self.channel.last_post_at,
            self.channel.update_at,
            self.team_update_at,
        ]
    }
}

impl ChannelList {
    pub fn etag(&self) -> String {
        list_etag(&self.0)
    }
}

impl ChannelListWithTeamData {
    pub fn etag(&self) -> String {
        list_etag(&self.0)
    }
}
