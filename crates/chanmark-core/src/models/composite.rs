//! Read-side composites pairing a bookmark with its file metadata.

use serde::{Deserialize, Serialize};

use super::bookmark::{Bookmark, BookmarkType};
use super::file_info::FileInfo;
use crate::defaults::BOOKMARK_FILE_OWNER;
use crate::text::trim_emoji;

// =============================================================================
// BOOKMARK WITH FILE
// =============================================================================

/// Response shape of a bookmark: the bookmark fields plus an optional `file`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkWithFile {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    #[serde(rename = "file", default, skip_serializing_if = "Option::is_none")]
    pub file_info: Option<FileInfo>,
}

impl Bookmark {
    /// Compose the response shape.
    ///
    /// The file is attached only when given and carrying an id. Emoji colons
    /// are stripped again so records saved before normalization existed
    /// render the same.
    pub fn to_bookmark_with_file(&self, file_info: Option<&FileInfo>) -> BookmarkWithFile {
        let bookmark = Bookmark {
            id: self.id.clone(),
            create_at: self.create_at,
            update_at: self.update_at,
            delete_at: self.delete_at,
            channel_id: self.channel_id.clone(),
            owner_id: self.owner_id.clone(),
            file_id: self.file_id.clone(),
            display_name: self.display_name.clone(),
            sort_order: self.sort_order,
            link_url: self.link_url.clone(),
            image_url: self.image_url.clone(),
            emoji: trim_emoji(&self.emoji).to_string(),
            bookmark_type: self.bookmark_type.clone(),
            original_id: self.original_id.clone(),
            parent_id: self.parent_id.clone(),
        };

        BookmarkWithFile {
            bookmark,
            file_info: file_info.filter(|f| f.has_identity()).cloned(),
        }
    }
}

// =============================================================================
// JOIN ROW
// =============================================================================

/// One denormalized storage row spanning a bookmark and its file.
///
/// `file_info_id` is the bookmark's own file reference; `file_id` is the id
/// column of the joined file row and is empty when the outer join found no
/// file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmarkAndFileRow {
    pub id: String,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
    pub channel_id: String,
    pub owner_id: String,
    pub file_info_id: String,
    pub display_name: String,
    pub sort_order: i64,
    pub link_url: String,
    pub image_url: String,
    pub emoji: String,
    #[serde(rename = "type")]
    pub bookmark_type: BookmarkType,
    pub original_id: String,
    pub parent_id: String,
    pub file_id: String,
    pub file_name: String,
    pub extension: String,
    pub size: i64,
    pub mime_type: String,
    pub width: i32,
    pub height: i32,
    pub has_preview_image: bool,
    pub mini_preview: Option<Vec<u8>>,
}

impl BookmarkAndFileRow {
    /// Split the row back into a bookmark and, when the join matched, its file.
    pub fn to_bookmark_with_file(&self) -> BookmarkWithFile {
        let bookmark = Bookmark {
            id: self.id.clone(),
            create_at: self.create_at,
            update_at: self.update_at,
            delete_at: self.delete_at,
            channel_id: self.channel_id.clone(),
            owner_id: self.owner_id.clone(),
            file_id: self.file_info_id.clone(),
            display_name: self.display_name.clone(),
            sort_order: self.sort_order,
            link_url: self.link_url.clone(),
            image_url: self.image_url.clone(),
            emoji: self.emoji.clone(),
            bookmark_type: self.bookmark_type.clone(),
            original_id: self.original_id.clone(),
            parent_id: self.parent_id.clone(),
        };

        let file_info = if !self.file_info_id.is_empty() && !self.file_id.is_empty() {
            Some(FileInfo {
                id: self.file_id.clone(),
                creator_id: BOOKMARK_FILE_OWNER.to_string(),
                name: self.file_name.clone(),
                extension: self.extension.clone(),
                size: self.size,
                mime_type: self.mime_type.clone(),
                width: self.width,
                height: self.height,
                has_preview_image: self.has_preview_image,
                // a zero-length thumbnail means no thumbnail
                mini_preview: self.mini_preview.clone().filter(|p| !p.is_empty()),
                ..FileInfo::default()
            })
        } else {
            None
        };

        BookmarkWithFile {
            bookmark,
            file_info,
        }
    }
}

// =============================================================================
// UPDATE RESPONSE
// =============================================================================

/// Outcome of a single bookmark mutation: at most one of `updated` or
/// `deleted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookmarkResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated: Option<BookmarkWithFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deleted: Option<BookmarkWithFile>,
}

impl UpdateBookmarkResponse {
    pub fn updated(bookmark: BookmarkWithFile) -> Self {
        Self {
            updated: Some(bookmark),
            deleted: None,
        }
    }

    pub fn deleted(bookmark: BookmarkWithFile) -> Self {
        Self {
            updated: None,
            deleted: Some(bookmark),
        }
    }

    pub fn updated_bookmark(&self) -> Option<&BookmarkWithFile> {
        self.updated.as_ref()
    }

    pub fn deleted_bookmark(&self) -> Option<&BookmarkWithFile> {
        self.deleted.as_ref()
    }
}
