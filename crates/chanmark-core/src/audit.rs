//! Redacted snapshots for audit records.
//!
//! Each projection lists its keys by hand. Display names, URLs, emoji and
//! thumbnail bytes never reach the audit log.

use serde_json::{json, Map, Value as JsonValue};

use crate::models::{
    Bookmark, BookmarkPatch, BookmarkWithFile, FileInfo, UpdateBookmarkResponse,
};

/// Snapshot of a record suitable for the audit log.
pub trait Auditable {
    fn auditable(&self) -> Map<String, JsonValue>;
}

fn object(value: JsonValue) -> Map<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        _ => Map::new(),
    }
}

impl Auditable for Bookmark {
    fn auditable(&self) -> Map<String, JsonValue> {
        object(json!({
            "id": self.id,
            "create_at": self.create_at,
            "update_at": self.update_at,
            "delete_at": self.delete_at,
            "channel_id": self.channel_id,
            "owner_id": self.owner_id,
            "file_id": self.file_id,
            "type": self.bookmark_type.as_str(),
            "original_id": self.original_id,
            "parent_id": self.parent_id,
        }))
    }
}

impl Auditable for BookmarkPatch {
    fn auditable(&self) -> Map<String, JsonValue> {
        object(json!({ "file_id": self.file_id }))
    }
}

impl Auditable for FileInfo {
    fn auditable(&self) -> Map<String, JsonValue> {
        object(json!({
            "id": self.id,
            "creator_id": self.creator_id,
            "post_id": self.post_id,
            "channel_id": self.channel_id,
            "create_at": self.create_at,
            "update_at": self.update_at,
            "delete_at": self.delete_at,
            "name": self.name,
            "extension": self.extension,
            "size": self.size,
        }))
    }
}

impl Auditable for BookmarkWithFile {
    fn auditable(&self) -> Map<String, JsonValue> {
        let mut a = self.bookmark.auditable();
        if let Some(file) = &self.file_info {
            a.insert("file".to_string(), JsonValue::Object(file.auditable()));
        }
        a
    }
}

impl Auditable for UpdateBookmarkResponse {
    fn auditable(&self) -> Map<String, JsonValue> {
        let mut a = Map::new();
        if let Some(updated) = self.updated_bookmark() {
            a.insert("updated".to_string(), JsonValue::Object(updated.auditable()));
        }
        if let Some(deleted) = self.deleted_bookmark() {
            a.insert("deleted".to_string(), JsonValue::Object(deleted.auditable()));
        }
        a
    }
}
