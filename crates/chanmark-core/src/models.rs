//! Core data models for chanmark.
//!
//! These types are shared by every chanmark crate and represent the channel
//! bookmark domain: the bookmark record, the file metadata it may point at,
//! the read-side composites and the channel lists that carry bookmarks.

mod bookmark;
mod channel;
mod composite;
mod file_info;

pub use bookmark::{Bookmark, BookmarkPatch, BookmarkType};
pub use channel::{
    Channel, ChannelList, ChannelListWithTeamData, ChannelWithBookmarks,
    ChannelWithTeamData, ChannelWithTeamDataAndBookmarks,
};
pub use composite::{BookmarkAndFileRow, BookmarkWithFile, UpdateBookmarkResponse};
pub use file_info::FileInfo;
