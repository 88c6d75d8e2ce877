use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::utils::Result;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// How the receiving side should present an attachment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    #[default]
    #[serde(other)]
    Document,
}

/// A file shipped inside an [`Event`](crate::event::Event).
///
/// `content` is raw bytes in memory and a standard base64 string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AttachmentKind,
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, kind: AttachmentKind, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            kind,
            content,
        }
    }

    /// Reads `path` into an attachment, guessing the kind from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attach".to_string());

        Ok(Self {
            name,
            kind: kind_for_path(path),
            content,
        })
    }
}

pub(crate) fn kind_for_path(path: &Path) -> AttachmentKind {
    let is_image = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false);

    if is_image {
        AttachmentKind::Image
    } else {
        AttachmentKind::Document
    }
}

mod base64_bytes {
    use super::*;

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    /// `null` decodes as empty content.
    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => STANDARD
                .decode(encoded.as_bytes())
                .map_err(serde::de::Error::custom),
            None => Ok(Vec::new()),
        }
    }
}
