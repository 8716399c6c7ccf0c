//! Field-level invariant checks for bookmarks.
//!
//! Checks run in a fixed order and stop at the first violation. Later checks
//! rely on earlier ones: the payload rules assume a known kind, and URL
//! format checks only run once the kind has made the URL required.

use tracing::debug;

use crate::defaults::{DISPLAY_NAME_MAX_RUNES, LINK_MAX_RUNES};
use crate::error::{BookmarkField, ValidationError};
use crate::ids::is_valid_id;
use crate::models::{Bookmark, BookmarkType};
use crate::text::{is_valid_http_url, rune_count};

/// Entity name used in violation codes.
pub const BOOKMARK_ENTITY: &str = "channel_bookmark";

/// Kind-specific view of a bookmark's payload fields.
///
/// Each kind owns one payload field; every other payload field must be empty.
/// File bookmarks never carry an `image_url`.
enum BookmarkPayload<'a> {
    Link {
        link_url: &'a str,
        image_url: &'a str,
        stray_file_id: &'a str,
    },
    File {
        file_id: &'a str,
        stray_link_url: &'a str,
        stray_image_url: &'a str,
    },
}

impl<'a> BookmarkPayload<'a> {
    fn of(b: &'a Bookmark) -> Option<Self> {
        match b.bookmark_type {
            BookmarkType::Link => Some(Self::Link {
                link_url: &b.link_url,
                image_url: &b.image_url,
                stray_file_id: &b.file_id,
            }),
            BookmarkType::File => Some(Self::File {
                file_id: &b.file_id,
                stray_link_url: &b.link_url,
                stray_image_url: &b.image_url,
            }),
            BookmarkType::Unknown(_) => None,
        }
    }

    fn check(&self) -> Result<(), BookmarkField> {
        match *self {
            Self::Link {
                link_url,
                image_url,
                stray_file_id,
            } => {
                if !stray_file_id.is_empty() {
                    return Err(BookmarkField::FileId);
                }
                if !is_bounded_url(link_url) {
                    return Err(BookmarkField::LinkUrl);
                }
                if !image_url.is_empty() && !is_bounded_url(image_url) {
                    return Err(BookmarkField::ImageUrl);
                }
                Ok(())
            }
            Self::File {
                file_id,
                stray_link_url,
                stray_image_url,
            } => {
                if !stray_link_url.is_empty() {
                    return Err(BookmarkField::LinkUrl);
                }
                if !is_valid_id(file_id) {
                    return Err(BookmarkField::FileId);
                }
                // file_id is set here, so an image_url breaks link/file exclusivity
                if !stray_image_url.is_empty() {
                    return Err(BookmarkField::LinkFile);
                }
                Ok(())
            }
        }
    }
}

fn is_bounded_url(value: &str) -> bool {
    !value.is_empty() && is_valid_http_url(value) && rune_count(value) <= LINK_MAX_RUNES
}

impl Bookmark {
    /// Check every record invariant, returning the first violation.
    ///
    /// Pure: no normalization happens here. Run [`Bookmark::pre_save`] or
    /// [`Bookmark::pre_update`] first so sanitized values are what get checked.
    pub fn is_valid(&self) -> Result<(), ValidationError> {
        self.check().map_err(|err| {
            debug!(
                subsystem = "model",
                component = "validator",
                op = "is_valid",
                bookmark_id = %self.id,
                channel_id = %self.channel_id,
                field = err.field.as_str(),
                code = %err.code(),
                "Bookmark rejected"
            );
            err
        })
    }

    fn check(&self) -> Result<(), ValidationError> {
        let plain = |field: BookmarkField| ValidationError::new(BOOKMARK_ENTITY, field);
        let located = |field: BookmarkField| plain(field).with_context(format!("id={}", self.id));

        if !is_valid_id(&self.id) {
            return Err(plain(BookmarkField::Id));
        }
        if self.create_at == 0 {
            return Err(located(BookmarkField::CreateAt));
        }
        if self.update_at == 0 {
            return Err(located(BookmarkField::UpdateAt));
        }
        if !is_valid_id(&self.channel_id) {
            return Err(plain(BookmarkField::ChannelId));
        }
        if !is_valid_id(&self.owner_id) {
            return Err(plain(BookmarkField::OwnerId));
        }
        if self.display_name.is_empty() || rune_count(&self.display_name) > DISPLAY_NAME_MAX_RUNES
        {
            return Err(plain(BookmarkField::DisplayName));
        }

        let payload = BookmarkPayload::of(self).ok_or_else(|| located(BookmarkField::Type))?;
        payload.check().map_err(located)?;

        if !self.original_id.is_empty() && !is_valid_id(&self.original_id) {
            return Err(plain(BookmarkField::OriginalId));
        }
        if !self.parent_id.is_empty() && !is_valid_id(&self.parent_id) {
            return Err(plain(BookmarkField::ParentId));
        }

        Ok(())
    }
}
