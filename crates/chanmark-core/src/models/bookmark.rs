//! Channel bookmark entity and its lifecycle transitions.
//!
//! A bookmark is either a link or an uploaded file pinned to a channel.
//! Records move through:
//!
//! ```text
//! new (empty id, zero stamps)
//!   └─ pre_save ──▶ stored ──┬─ patch + pre_update ──▶ stored (update_at bumped)
//!                            ├─ soft_delete ─────────▶ deleted (delete_at set)
//!                            └─ set_original ────────▶ new record (lineage fork)
//! ```
//!
//! None of the transitions validate. Callers run [`Bookmark::is_valid`] after
//! normalization and before persisting.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::ids::{new_id, now_millis};
use crate::text::{sanitize_unicode, trim_emoji};

// =============================================================================
// BOOKMARK TYPE
// =============================================================================

/// Kind of a bookmark. Decides which payload fields are legal.
///
/// Unrecognized wire values are kept verbatim in `Unknown` so the validator
/// can reject them instead of the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookmarkType {
    Link,
    File,
    Unknown(String),
}

impl BookmarkType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Link => "link",
            Self::File => "file",
            Self::Unknown(raw) => raw,
        }
    }

    /// True for `link` and `file`.
    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Default for BookmarkType {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl fmt::Display for BookmarkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for BookmarkType {
    fn from(s: &str) -> Self {
        match s {
            "link" => Self::Link,
            "file" => Self::File,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for BookmarkType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "link" => Self::Link,
            "file" => Self::File,
            _ => Self::Unknown(s),
        }
    }
}

impl From<BookmarkType> for String {
    fn from(t: BookmarkType) -> Self {
        match t {
            BookmarkType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

// =============================================================================
// BOOKMARK
// =============================================================================

/// A channel bookmark record.
///
/// Timestamps are milliseconds since the Unix epoch; zero means unset.
/// `delete_at == 0` means the bookmark is live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bookmark {
    pub id: String,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
    pub channel_id: String,
    pub owner_id: String,
    pub file_id: String,
    pub display_name: String,
    pub sort_order: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub link_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image_url: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub emoji: String,
    #[serde(rename = "type")]
    pub bookmark_type: BookmarkType,
    /// Bookmark this one was forked from.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub original_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
}

impl Bookmark {
    /// New unsaved link bookmark.
    pub fn new_link(
        channel_id: impl Into<String>,
        owner_id: impl Into<String>,
        display_name: impl Into<String>,
        link_url: impl Into<String>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            owner_id: owner_id.into(),
            display_name: display_name.into(),
            link_url: link_url.into(),
            bookmark_type: BookmarkType::Link,
            ..Self::default()
        }
    }

    /// New unsaved file bookmark.
    pub fn new_file(
        channel_id: impl Into<String>,
        owner_id: impl Into<String>,
        display_name: impl Into<String>,
        file_id: impl Into<String>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            owner_id: owner_id.into(),
            display_name: display_name.into(),
            file_id: file_id.into(),
            bookmark_type: BookmarkType::File,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.delete_at != 0
    }

    /// Normalize a record before its first save.
    ///
    /// Assigns an id when missing, sanitizes the display name, strips emoji
    /// colons, stamps `create_at` when unset and aligns `update_at` with it.
    pub fn pre_save(&mut self) {
        if self.id.is_empty() {
            self.id = new_id();
        }

        self.display_name = sanitize_unicode(&self.display_name);
        self.emoji = trim_emoji(&self.emoji).to_string();
        if self.create_at == 0 {
            self.create_at = now_millis();
        }
        self.update_at = self.create_at;

        trace!(
            subsystem = "model",
            component = "lifecycle",
            op = "pre_save",
            bookmark_id = %self.id,
            create_at = self.create_at,
            "Bookmark normalized for insert"
        );
    }

    /// Normalize a record before an update: bump `update_at` and re-apply
    /// the display name and emoji normalization.
    pub fn pre_update(&mut self) {
        self.update_at = now_millis();
        self.display_name = sanitize_unicode(&self.display_name);
        self.emoji = trim_emoji(&self.emoji).to_string();

        trace!(
            subsystem = "model",
            component = "lifecycle",
            op = "pre_update",
            bookmark_id = %self.id,
            update_at = self.update_at,
            "Bookmark normalized for update"
        );
    }

    /// Mark the record deleted. The content is left intact.
    pub fn soft_delete(&mut self) {
        let now = now_millis();
        self.delete_at = now;
        self.update_at = now;
    }

    /// Overwrite every field present in `patch`. The kind never changes.
    pub fn patch(&mut self, patch: &BookmarkPatch) {
        if let Some(file_id) = &patch.file_id {
            self.file_id = file_id.clone();
        }
        if let Some(display_name) = &patch.display_name {
            self.display_name = display_name.clone();
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(link_url) = &patch.link_url {
            self.link_url = link_url.clone();
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(emoji) = &patch.emoji {
            self.emoji = emoji.clone();
        }
    }

    /// Fork this bookmark for a new owner.
    ///
    /// The copy has no id and zero timestamps, points back at this record
    /// through `original_id` and belongs to `new_owner_id`. Only one hop of
    /// lineage is kept: any `original_id` on `self` is overwritten.
    pub fn set_original(&self, new_owner_id: impl Into<String>) -> Bookmark {
        let fork = Bookmark {
            id: String::new(),
            create_at: 0,
            update_at: 0,
            delete_at: 0,
            channel_id: self.channel_id.clone(),
            owner_id: new_owner_id.into(),
            file_id: self.file_id.clone(),
            display_name: self.display_name.clone(),
            sort_order: self.sort_order,
            link_url: self.link_url.clone(),
            image_url: self.image_url.clone(),
            emoji: self.emoji.clone(),
            bookmark_type: self.bookmark_type.clone(),
            original_id: self.id.clone(),
            parent_id: self.parent_id.clone(),
        };

        trace!(
            subsystem = "model",
            component = "lineage",
            op = "set_original",
            original_id = %self.id,
            owner_id = %fork.owner_id,
            "Bookmark forked"
        );

        fork
    }
}

// =============================================================================
// PATCH
// =============================================================================

/// Partial update for a bookmark. `None` leaves the field untouched;
/// `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl BookmarkPatch {
    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.file_id.is_none()
            && self.display_name.is_none()
            && self.sort_order.is_none()
            && self.link_url.is_none()
            && self.image_url.is_none()
            && self.emoji.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::is_valid_id;
    use serde_json::json;

    fn stored_link() -> Bookmark {
        Bookmark {
            id: new_id(),
            create_at: 2,
            update_at: 3,
            delete_at: 0,
            channel_id: new_id(),
            owner_id: new_id(),
            file_id: String::new(),
            display_name: "display name".to_string(),
            sort_order: 7,
            link_url: "https://example.com".to_string(),
            image_url: "https://example.com/logo".to_string(),
            emoji: "smile".to_string(),
            bookmark_type: BookmarkType::Link,
            original_id: String::new(),
            parent_id: new_id(),
        }
    }

    // =========================================================================
    // Type tests
    // =========================================================================

    #[test]
    fn test_bookmark_type_from_str() {
        assert_eq!(BookmarkType::from("link"), BookmarkType::Link);
        assert_eq!(BookmarkType::from("file"), BookmarkType::File);
        assert_eq!(
            BookmarkType::from("invalid"),
            BookmarkType::Unknown("invalid".to_string())
        );
        assert!(!BookmarkType::default().is_known());
        assert_eq!(BookmarkType::default().as_str(), "");
    }

    #[test]
    fn test_bookmark_type_wire_roundtrip_keeps_unknown() {
        let t: BookmarkType = serde_json::from_value(json!("folder")).unwrap();
        assert_eq!(t, BookmarkType::Unknown("folder".to_string()));
        assert_eq!(serde_json::to_value(&t).unwrap(), json!("folder"));
        assert_eq!(serde_json::to_value(BookmarkType::File).unwrap(), json!("file"));
    }

    // =========================================================================
    // Wire shape tests
    // =========================================================================

    #[test]
    fn test_wire_field_names() {
        let b = stored_link();
        let value = serde_json::to_value(&b).unwrap();
        let obj = value.as_object().unwrap();

        for key in [
            "id",
            "create_at",
            "update_at",
            "delete_at",
            "channel_id",
            "owner_id",
            "file_id",
            "display_name",
            "sort_order",
            "link_url",
            "image_url",
            "emoji",
            "type",
            "parent_id",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj["type"], json!("link"));
        assert!(!obj.contains_key("bookmark_type"));
    }

    #[test]
    fn test_empty_optional_strings_are_omitted() {
        let b = Bookmark::new_file(new_id(), new_id(), "roadmap", new_id());
        let value = serde_json::to_value(&b).unwrap();
        let obj = value.as_object().unwrap();

        assert!(!obj.contains_key("link_url"));
        assert!(!obj.contains_key("image_url"));
        assert!(!obj.contains_key("emoji"));
        assert!(!obj.contains_key("original_id"));
        assert!(!obj.contains_key("parent_id"));
        // file_id is always present
        assert!(obj.contains_key("file_id"));
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let b: Bookmark = serde_json::from_value(json!({
            "display_name": "Docs",
            "link_url": "https://example.com",
            "type": "link"
        }))
        .unwrap();

        assert!(b.id.is_empty());
        assert_eq!(b.create_at, 0);
        assert_eq!(b.bookmark_type, BookmarkType::Link);
        assert!(b.emoji.is_empty());
    }

    // =========================================================================
    // Lifecycle tests
    // =========================================================================

    #[test]
    fn test_pre_save_assigns_identity_and_stamps() {
        let mut b = Bookmark::new_link(new_id(), new_id(), "display name", "https://example.com");
        b.pre_save();

        assert!(is_valid_id(&b.id));
        assert_ne!(b.create_at, 0);
        assert_eq!(b.update_at, b.create_at);
    }

    #[test]
    fn test_pre_save_keeps_existing_id_and_create_at() {
        let mut b = stored_link();
        let id = b.id.clone();
        b.create_at = 42;
        b.update_at = 99;
        b.pre_save();

        assert_eq!(b.id, id);
        assert_eq!(b.create_at, 42);
        assert_eq!(b.update_at, 42);
    }

    #[test]
    fn test_pre_save_only_touches_normalized_fields() {
        let mut b = Bookmark::new_link(new_id(), new_id(), "display name", "https://example.com");
        b.id = new_id();
        let mut expected = b.clone();

        b.pre_save();
        expected.create_at = b.create_at;
        expected.update_at = b.update_at;
        assert_eq!(b, expected);
    }

    #[test]
    fn test_pre_save_normalizes_name_and_emoji() {
        let mut b = Bookmark::new_link(new_id(), new_id(), "Do\u{202E}cs", "https://example.com");
        b.emoji = ":smile:".to_string();
        b.pre_save();

        assert_eq!(b.display_name, "Docs");
        assert_eq!(b.emoji, "smile");
    }

    #[test]
    fn test_pre_update_bumps_update_at() {
        let mut b = stored_link();
        b.pre_save();
        let saved_update_at = b.update_at;
        b.update_at = 1;
        b.emoji = ":tada:".to_string();
        b.pre_update();

        assert!(b.update_at >= saved_update_at);
        assert_eq!(b.emoji, "tada");
    }

    #[test]
    fn test_emoji_normalization_idempotent() {
        let mut b = stored_link();
        b.emoji = ":smile:".to_string();
        b.pre_update();
        assert_eq!(b.emoji, "smile");
        b.pre_update();
        assert_eq!(b.emoji, "smile");
    }

    #[test]
    fn test_soft_delete_keeps_content() {
        let mut b = stored_link();
        let before = b.clone();
        assert!(!b.is_deleted());

        b.soft_delete();

        assert!(b.is_deleted());
        assert_eq!(b.update_at, b.delete_at);
        assert_eq!(b.display_name, before.display_name);
        assert_eq!(b.link_url, before.link_url);
        assert_eq!(b.id, before.id);
    }

    // =========================================================================
    // Patch tests
    // =========================================================================

    #[test]
    fn test_patch_applies_present_fields() {
        let patch = BookmarkPatch {
            display_name: Some(new_id()),
            sort_order: Some(1),
            link_url: Some(new_id()),
            ..BookmarkPatch::default()
        };

        let mut b = Bookmark {
            id: new_id(),
            display_name: new_id(),
            bookmark_type: BookmarkType::Link,
            link_url: new_id(),
            ..Bookmark::default()
        };
        b.patch(&patch);

        assert!(b.file_id.is_empty());
        assert_eq!(Some(&b.display_name), patch.display_name.as_ref());
        assert_eq!(Some(b.sort_order), patch.sort_order);
        assert_eq!(Some(&b.link_url), patch.link_url.as_ref());
        assert_eq!(b.bookmark_type, BookmarkType::Link);
    }

    #[test]
    fn test_patch_display_name_only() {
        let mut b = stored_link();
        let before = b.clone();
        b.patch(&BookmarkPatch {
            display_name: Some("Renamed".to_string()),
            ..BookmarkPatch::default()
        });

        assert_eq!(b.display_name, "Renamed");
        assert_eq!(b.link_url, before.link_url);
        assert_eq!(b.file_id, before.file_id);
        assert_eq!(b.sort_order, before.sort_order);
        assert_eq!(b.image_url, before.image_url);
        assert_eq!(b.emoji, before.emoji);
    }

    #[test]
    fn test_patch_some_empty_clears_field() {
        let mut b = stored_link();
        b.patch(&BookmarkPatch {
            image_url: Some(String::new()),
            ..BookmarkPatch::default()
        });
        assert!(b.image_url.is_empty());
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let patch = BookmarkPatch::default();
        assert!(patch.is_empty());

        let mut b = stored_link();
        let before = b.clone();
        b.patch(&patch);
        assert_eq!(b, before);
    }

    #[test]
    fn test_patch_deserialize_null_is_absent() {
        let patch: BookmarkPatch = serde_json::from_value(json!({
            "display_name": null,
            "sort_order": 5
        }))
        .unwrap();

        assert!(patch.display_name.is_none());
        assert_eq!(patch.sort_order, Some(5));
        assert!(!patch.is_empty());
    }

    // =========================================================================
    // Fork tests
    // =========================================================================

    #[test]
    fn test_set_original_resets_identity() {
        let mut b = stored_link();
        b.delete_at = 10;
        b.original_id = new_id();
        let owner = new_id();

        let fork = b.set_original(owner.clone());

        assert!(fork.id.is_empty());
        assert_eq!(fork.create_at, 0);
        assert_eq!(fork.update_at, 0);
        assert_eq!(fork.delete_at, 0);
        assert_eq!(fork.original_id, b.id);
        assert_eq!(fork.owner_id, owner);
    }

    #[test]
    fn test_set_original_copies_content() {
        let b = stored_link();
        let fork = b.set_original(new_id());

        assert_eq!(fork.channel_id, b.channel_id);
        assert_eq!(fork.display_name, b.display_name);
        assert_eq!(fork.sort_order, b.sort_order);
        assert_eq!(fork.link_url, b.link_url);
        assert_eq!(fork.image_url, b.image_url);
        assert_eq!(fork.emoji, b.emoji);
        assert_eq!(fork.bookmark_type, b.bookmark_type);
        assert_eq!(fork.parent_id, b.parent_id);
    }

    #[test]
    fn test_set_original_leaves_source_untouched() {
        let b = stored_link();
        let before = b.clone();
        let _ = b.set_original(new_id());
        assert_eq!(b, before);
    }
}
