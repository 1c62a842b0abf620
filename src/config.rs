//! Pasteboard and host configuration.
//!
//! Both structs are plain values with sensible defaults; the binary
//! fills them from command-line flags.

use crate::mime::SMART_PASTE;

/// Behaviour knobs for a pasteboard instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteboardConfig {
    /// Wrap serialized selections in a full HTML document with an
    /// explicit UTF-8 charset and store the bytes verbatim, for hosts
    /// that do not decode a bare fragment correctly.
    pub wrap_markup_document: bool,
    /// Type identifier of the zero-length smart-paste marker entry.
    pub smart_paste_type: String,
}

impl Default for PasteboardConfig {
    fn default() -> Self {
        Self {
            wrap_markup_document: cfg!(target_os = "macos"),
            smart_paste_type: SMART_PASTE.to_owned(),
        }
    }
}

/// Settings for [`crate::host::XclipClipboard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XclipConfig {
    /// Program name or path of the `xclip` binary.
    pub program: String,
    /// X display to use instead of `$DISPLAY`.
    pub display: Option<String>,
}

impl Default for XclipConfig {
    fn default() -> Self {
        Self {
            program: "xclip".to_owned(),
            display: None,
        }
    }
}
