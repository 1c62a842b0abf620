//! Payload files — `MimeData` snapshots encoded as MessagePack.
//!
//! Lets a drag payload or a clipboard snapshot be saved to disk and
//! replayed later through [`Pasteboard::for_drag_data`]. Entries keep
//! their insertion order; raw bytes are stored as MessagePack binary.
//!
//! [`Pasteboard::for_drag_data`]: crate::Pasteboard::for_drag_data

use std::path::Path;

use crate::editing::DragData;
use crate::mime::MimeData;

/// Maximum encoded payload size (64 MiB).
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024 * 1024;

/// Payload error type.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("payload too large: {0} bytes (max {MAX_PAYLOAD_SIZE})")]
    TooLarge(usize),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("MessagePack encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("MessagePack decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

pub fn encode(data: &MimeData) -> Result<Vec<u8>, PayloadError> {
    let bytes = rmp_serde::to_vec_named(data)?;
    if bytes.len() > MAX_PAYLOAD_SIZE {
        return Err(PayloadError::TooLarge(bytes.len()));
    }
    Ok(bytes)
}

pub fn decode(bytes: &[u8]) -> Result<MimeData, PayloadError> {
    if bytes.len() > MAX_PAYLOAD_SIZE {
        return Err(PayloadError::TooLarge(bytes.len()));
    }
    Ok(rmp_serde::from_slice(bytes)?)
}

/// Write `data` to `path`, replacing any existing file.
pub fn save(path: &Path, data: &MimeData) -> Result<(), PayloadError> {
    let bytes = encode(data)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "payload: saved");
    Ok(())
}

/// Load a payload file as drag data.
pub fn load(path: &Path) -> Result<DragData, PayloadError> {
    let bytes = std::fs::read(path)?;
    let data = decode(&bytes)?;
    tracing::debug!(path = %path.display(), entries = data.entries().len(), "payload: loaded");
    Ok(DragData::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mime::Bitmap;

    fn sample() -> MimeData {
        let mut md = MimeData::new();
        md.set_text("hello");
        md.set_data("application/x-zero", Vec::new());
        md.set_urls(&["file:///tmp/a"]);
        md
    }

    #[test]
    fn preserves_entry_order_and_empty_entries() {
        let decoded = decode(&encode(&sample()).unwrap()).unwrap();
        assert_eq!(decoded, sample());
        assert_eq!(
            decoded.formats().collect::<Vec<_>>(),
            vec!["text/plain", "application/x-zero", "text/uri-list"]
        );
    }

    #[test]
    fn image_slot_survives() {
        let mut md = MimeData::new();
        md.set_image(Bitmap::from_rgba(1, 1, vec![9, 8, 7, 6]).unwrap());
        let decoded = decode(&encode(&md).unwrap()).unwrap();
        assert_eq!(decoded.image(), md.image());
    }

    #[test]
    fn garbage_is_decode_error() {
        let err = decode(b"\xc1\xc1\xc1").unwrap_err();
        assert!(matches!(err, PayloadError::Decode(_)));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drag.msgpack");
        save(&path, &sample()).unwrap();
        let drag = load(&path).unwrap();
        assert_eq!(drag.platform_data(), &sample());
    }

    #[test]
    fn load_missing_file() {
        let err = load(Path::new("/nonexistent/dir/drag.msgpack")).unwrap_err();
        assert!(matches!(err, PayloadError::Io(_)));
    }
}
