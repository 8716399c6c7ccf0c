//! File metadata snapshot as handed over by the file-storage subsystem.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Metadata of an uploaded file. The bytes live elsewhere; only the inline
/// thumbnail (`mini_preview`) travels with the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    pub id: String,
    pub creator_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub post_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub channel_id: String,
    pub create_at: i64,
    pub update_at: i64,
    pub delete_at: i64,
    pub name: String,
    pub extension: String,
    pub size: i64,
    pub mime_type: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub width: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub height: i32,
    pub has_preview_image: bool,
    #[serde(
        with = "mini_preview_base64",
        skip_serializing_if = "Option::is_none"
    )]
    pub mini_preview: Option<Vec<u8>>,
}

impl FileInfo {
    /// True when this snapshot identifies a stored file.
    #[inline]
    pub fn has_identity(&self) -> bool {
        !self.id.is_empty()
    }
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

/// Thumbnails are base64 strings on the wire.
mod mini_preview_base64 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => s.serialize_str(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(d)?;
        encoded
            .map(|e| STANDARD.decode(e).map_err(serde::de::Error::custom))
            .transpose()
    }
}
