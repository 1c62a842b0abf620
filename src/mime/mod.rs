//! Type identifiers and typed-entry containers.
//!
//! Type identifiers are MIME-like strings. Two of them are privileged:
//! `text/plain` and `text/html` map onto native text and rich-text slots
//! and match with a trailing `;` parameter clause (`text/plain;
//! charset=utf-8` is still plain text). Everything else is an opaque
//! byte entry keyed by the literal identifier.

mod data;
pub mod utf16;

pub use data::{Bitmap, Entry, MimeData};

/// Plain text, stored as UTF-8.
pub const TEXT_PLAIN: &str = "text/plain";

/// Rich text markup, stored as UTF-8.
pub const TEXT_HTML: &str = "text/html";

/// URL list (RFC 2483), one URL per line.
pub const TEXT_URI_LIST: &str = "text/uri-list";

/// Default zero-length marker type signalling smart copy/delete
/// eligibility to a later paste.
pub const SMART_PASTE: &str = "application/vnd.pasteboard.smartpaste";

/// Whether `format` names plain text, with or without parameters.
pub fn is_text_type(format: &str) -> bool {
    matches_privileged(format, TEXT_PLAIN)
}

/// Whether `format` names HTML markup, with or without parameters.
pub fn is_html_type(format: &str) -> bool {
    matches_privileged(format, TEXT_HTML)
}

fn matches_privileged(format: &str, privileged: &str) -> bool {
    match format.strip_prefix(privileged) {
        Some(rest) => rest.is_empty() || rest.starts_with(';'),
        None => false,
    }
}
