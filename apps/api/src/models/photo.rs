use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A single uploaded photo.
///
/// `data` holds the raw (still encoded) image bytes, decoded from base64 once at
/// request time. The bytes are never serialized back out; plan previews only
/// carry id, name and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PhotoUpload")]
pub struct Photo {
    pub id: Uuid,
    pub name: String,
    /// Byte size of the image payload.
    pub size: u64,
    #[serde(skip_serializing)]
    pub data: Bytes,
}

impl Photo {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            size: data.len() as u64,
            data,
        }
    }

    /// Swaps in edited image bytes. Identity is preserved.
    pub fn replace_data(&mut self, data: impl Into<Bytes>) {
        self.data = data.into();
        self.size = self.data.len() as u64;
    }
}

/// Wire shape of a photo: image bytes travel as base64 or as a `data:` URL.
#[derive(Debug, Deserialize)]
struct PhotoUpload {
    id: Option<Uuid>,
    #[serde(default)]
    name: String,
    size: Option<u64>,
    data: String,
}

#[derive(Debug, Error)]
pub enum PhotoPayloadError {
    #[error("photo data URL has no ',' separator")]
    MalformedDataUrl,

    #[error("photo data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl TryFrom<PhotoUpload> for Photo {
    type Error = PhotoPayloadError;

    fn try_from(upload: PhotoUpload) -> Result<Self, Self::Error> {
        let mut photo = Photo::new(upload.name, decode_payload(&upload.data)?);
        if let Some(id) = upload.id {
            photo.id = id;
        }
        if let Some(size) = upload.size {
            photo.size = size;
        }
        Ok(photo)
    }
}

/// Decodes `data:image/jpeg;base64,<payload>` or a bare base64 payload.
pub fn decode_payload(raw: &str) -> Result<Vec<u8>, PhotoPayloadError> {
    let payload = if raw.starts_with("data:") {
        raw.split_once(',')
            .map(|(_, payload)| payload)
            .ok_or(PhotoPayloadError::MalformedDataUrl)?
    } else {
        raw
    };

    Ok(base64::engine::general_purpose::STANDARD.decode(payload.trim())?)
}

/// Formats a byte count for log lines, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    format!("{rounded} {}", UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload_accepts_data_url() {
        // "hello" in base64
        let bytes = decode_payload("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_decode_payload_accepts_bare_base64() {
        assert_eq!(decode_payload("aGVsbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_payload_rejects_garbage() {
        assert!(matches!(
            decode_payload("not base64 at all!"),
            Err(PhotoPayloadError::Base64(_))
        ));
        assert!(matches!(
            decode_payload("data:image/png;base64"),
            Err(PhotoPayloadError::MalformedDataUrl)
        ));
    }

    #[test]
    fn test_deserialize_fills_missing_id_and_size() {
        let photo: Photo =
            serde_json::from_str(r#"{"name":"a.jpg","data":"aGVsbG8="}"#).unwrap();
        assert_eq!(photo.name, "a.jpg");
        assert_eq!(photo.size, 5);
        assert_eq!(&photo.data[..], b"hello");
        assert!(!photo.id.is_nil());
    }

    #[test]
    fn test_serialize_omits_image_bytes() {
        let photo = Photo::new("a.jpg", b"hello".to_vec());
        let json = serde_json::to_value(&photo).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["size"], 5);
    }

    #[test]
    fn test_replace_data_keeps_identity() {
        let mut photo = Photo::new("a.jpg", vec![0u8; 10]);
        let id = photo.id;
        photo.replace_data(vec![1u8; 3]);
        assert_eq!(photo.id, id);
        assert_eq!(photo.size, 3);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
