//! Error types for chanmark.

use std::fmt;
use thiserror::Error;

/// Result type alias using chanmark's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP status reported for every validation failure.
pub const VALIDATION_STATUS: u16 = 400;

/// Field that failed bookmark validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookmarkField {
    Id,
    CreateAt,
    UpdateAt,
    ChannelId,
    OwnerId,
    DisplayName,
    Type,
    FileId,
    LinkUrl,
    ImageUrl,
    /// `image_url` and `file_id` set together.
    LinkFile,
    OriginalId,
    ParentId,
}

impl BookmarkField {
    /// Wire name used inside violation codes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreateAt => "create_at",
            Self::UpdateAt => "update_at",
            Self::ChannelId => "channel_id",
            Self::OwnerId => "owner_id",
            Self::DisplayName => "display_name",
            Self::Type => "type",
            Self::FileId => "file_id",
            Self::LinkUrl => "link_url",
            Self::ImageUrl => "image_url",
            Self::LinkFile => "link_file",
            Self::OriginalId => "original_id",
            Self::ParentId => "parent_id",
        }
    }
}

impl fmt::Display for BookmarkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record-level validation violation.
///
/// Carries the entity name, the failing field and optional context (usually
/// `id=<record id>`) so the offending record can be found in logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{entity}.is_valid.{field}.invalid{}", context_suffix(.context))]
pub struct ValidationError {
    pub entity: &'static str,
    pub field: BookmarkField,
    pub context: Option<String>,
}

impl ValidationError {
    pub fn new(entity: &'static str, field: BookmarkField) -> Self {
        Self {
            entity,
            field,
            context: None,
        }
    }

    /// Attach free-text context, usually `id=<record id>`.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Machine-stable code: `<entity>.is_valid.<field>.invalid`.
    pub fn code(&self) -> String {
        format!("{}.is_valid.{}.invalid", self.entity, self.field.as_str())
    }

    /// HTTP-style status for this violation.
    #[inline]
    pub fn status(&self) -> u16 {
        VALIDATION_STATUS
    }
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(context) => format!(" ({})", context),
        None => String::new(),
    }
}

/// Core error type for chanmark operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A record failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP-style status a transport layer would report for this error.
    pub fn status(&self) -> u16 {
        match self {
            Error::Validation(v) => v.status(),
            Error::InvalidInput(_) | Error::Serialization(_) => 400,
            Error::Config(_) | Error::Io(_) => 500,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
