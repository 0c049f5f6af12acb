use super::common::MediaKind;
use crate::error::{GenerationError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: String, // Base64 encoded
}

impl GeneratedImage {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Inverse of [`GeneratedImage::data_uri`].
    pub fn from_data_uri(uri: &str) -> Option<Self> {
        let (header, data) = uri.strip_prefix("data:")?.split_once(',')?;
        let mime_type = header.strip_suffix(";base64")?;
        Some(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    pub fn bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| GenerationError::Parse(format!("invalid base64 image data: {}", e)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedVideo {
    /// Playable locator with the access credential already appended.
    pub uri: String,
    pub operation: String,
    pub status_checks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMedia {
    pub kind: MediaKind,
    pub url: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

impl GeneratedMedia {
    pub fn new(kind: MediaKind, url: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            prompt: prompt.into(),
            created_at: Utc::now(),
        }
    }

    pub fn download_name(&self) -> String {
        format!("generated-media.{}", self.kind.file_extension())
    }
}

/// Appends the access credential to a video locator.
pub fn with_access_key(uri: &str, api_key: &str) -> String {
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{}{}key={}", uri, separator, api_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_and_bytes() {
        let image = GeneratedImage {
            mime_type: "image/png".into(),
            data: STANDARD.encode([0x89u8, b'P', b'N', b'G']),
        };
        assert!(image.data_uri().starts_with("data:image/png;base64,"));
        assert_eq!(image.bytes().unwrap(), vec![0x89, b'P', b'N', b'G']);
        assert_eq!(GeneratedImage::from_data_uri(&image.data_uri()), Some(image));
        assert!(GeneratedImage::from_data_uri("https://host/img.png").is_none());
    }

    #[test]
    fn test_invalid_base64_is_parse_error() {
        let image = GeneratedImage {
            mime_type: "image/png".into(),
            data: "not base64!!".into(),
        };
        assert!(matches!(image.bytes(), Err(GenerationError::Parse(_))));
    }

    #[test]
    fn test_access_key_separator() {
        assert_eq!(
            with_access_key("https://host/v1/files/abc:download?alt=media", "k"),
            "https://host/v1/files/abc:download?alt=media&key=k"
        );
        assert_eq!(with_access_key("https://host/video", "k"), "https://host/video?key=k");
    }

    #[test]
    fn test_download_name() {
        let media = GeneratedMedia::new(MediaKind::Video, "https://host/v", "a cat");
        assert_eq!(media.download_name(), "generated-media.mp4");
    }
}
