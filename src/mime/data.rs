//! `MimeData` — an ordered collection of typed entries.
//!
//! Text, HTML and URL lists live under their well-known type
//! identifiers, so they show up in [`MimeData::formats`] like any other
//! entry. The image slot is separate: it carries a decoded bitmap and is
//! never listed as a type.

use serde::{Deserialize, Serialize};

use super::{TEXT_HTML, TEXT_PLAIN, TEXT_URI_LIST};

/// A single (type identifier, payload) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub format: String,
    #[serde(with = "serde_bytes")]
    pub data: Vec<u8>,
}

/// An RGBA8 bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA pixels, `width * height * 4` bytes.
    #[serde(with = "serde_bytes")]
    pub rgba: Vec<u8>,
}

impl Bitmap {
    /// Build a bitmap, returning `None` if `rgba` does not hold exactly
    /// `width * height` pixels.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (rgba.len() == expected).then_some(Self {
            width,
            height,
            rgba,
        })
    }
}

/// Typed entries plus an optional image slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeData {
    entries: Vec<Entry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<Bitmap>,
}

impl MimeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type identifiers in insertion order.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.format.as_str())
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// True when there are no entries and no image.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.image.is_none()
    }

    /// Exact match on the literal type identifier.
    pub fn has_format(&self, format: &str) -> bool {
        self.entries.iter().any(|e| e.format == format)
    }

    pub fn data(&self, format: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.format == format)
            .map(|e| e.data.as_slice())
    }

    /// Set the payload for `format`, replacing an existing entry in place.
    pub fn set_data(&mut self, format: impl Into<String>, data: impl Into<Vec<u8>>) {
        let format = format.into();
        let data = data.into();
        match self.entries.iter_mut().find(|e| e.format == format) {
            Some(entry) => entry.data = data,
            None => self.entries.push(Entry { format, data }),
        }
    }

    /// Remove the entry for `format`. Returns whether anything was removed.
    pub fn remove_format(&mut self, format: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.format != format);
        self.entries.len() != before
    }

    pub fn has_text(&self) -> bool {
        self.has_format(TEXT_PLAIN)
    }

    pub fn text(&self) -> Option<String> {
        self.data(TEXT_PLAIN)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn set_text(&mut self, text: &str) {
        self.set_data(TEXT_PLAIN, text.as_bytes());
    }

    pub fn has_html(&self) -> bool {
        self.has_format(TEXT_HTML)
    }

    pub fn html(&self) -> Option<String> {
        self.data(TEXT_HTML)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn set_html(&mut self, html: &str) {
        self.set_data(TEXT_HTML, html.as_bytes());
    }

    pub fn has_urls(&self) -> bool {
        self.has_format(TEXT_URI_LIST)
    }

    /// URLs from the `text/uri-list` entry. Comment lines (`#`) and
    /// blank lines are skipped.
    pub fn urls(&self) -> Vec<String> {
        let Some(bytes) = self.data(TEXT_URI_LIST) else {
            return Vec::new();
        };
        String::from_utf8_lossy(bytes)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect()
    }

    /// Replace the URL list. Lines are CRLF-terminated as RFC 2483 asks.
    pub fn set_urls<S: AsRef<str>>(&mut self, urls: &[S]) {
        let mut list = String::new();
        for url in urls {
            list.push_str(url.as_ref());
            list.push_str("\r\n");
        }
        self.set_data(TEXT_URI_LIST, list.into_bytes());
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    pub fn set_image(&mut self, image: Bitmap) {
        self.image = Some(image);
    }
}
