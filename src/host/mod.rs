//! Host clipboard service — the narrow capability a pasteboard talks to.
//!
//! Platform adapters implement [`ClipboardService`]; a pasteboard holds
//! one behind an `Arc` and never reaches for a process-global clipboard.
//! [`MemoryClipboard`] is a deterministic in-process service,
//! [`XclipClipboard`] drives the X11 clipboard through `xclip`.

pub mod memory;
pub mod xclip;

pub use memory::MemoryClipboard;
pub use xclip::XclipClipboard;

use crate::mime::{Bitmap, MimeData};

/// Which host clipboard an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipboardMode {
    /// The regular copy/paste clipboard.
    Clipboard,
    /// The primary selection, on hosts that distinguish it.
    Selection,
}

/// Errors returned by clipboard services.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// The service cannot be reached at all (no display, poisoned state).
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// A helper command failed to spawn or exited unsuccessfully.
    #[error("command: {0}")]
    Command(String),

    /// Pipe or stream error while talking to the host.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image could not be converted to a host representation.
    #[error("image: {0}")]
    Image(String),
}

/// Reads and writes typed data on the host clipboard.
///
/// The required methods move whole entry sets; the provided ones are
/// conveniences that adapters may override when the host can answer
/// them without materialising every entry.
///
/// `Send + Sync` so a single service can be shared by every pasteboard
/// in the process.
pub trait ClipboardService: Send + Sync {
    /// Snapshot the entries currently on `mode`. `None` when the host
    /// clipboard has no owner or `mode` is unsupported.
    fn mime_data(&self, mode: ClipboardMode) -> Result<Option<MimeData>, HostError>;

    /// Replace the contents of `mode`. `None` clears it.
    fn set_mime_data(&self, data: Option<MimeData>, mode: ClipboardMode) -> Result<(), HostError>;

    /// Replace the contents of `mode` with a bare image.
    fn set_image(&self, image: &Bitmap, mode: ClipboardMode) -> Result<(), HostError>;

    /// Type identifiers present on `mode`, in host order.
    fn formats(&self, mode: ClipboardMode) -> Result<Vec<String>, HostError> {
        Ok(self
            .mime_data(mode)?
            .map(|data| data.formats().map(str::to_owned).collect())
            .unwrap_or_default())
    }

    fn has_format(&self, format: &str, mode: ClipboardMode) -> Result<bool, HostError> {
        Ok(self.formats(mode)?.iter().any(|f| f == format))
    }

    /// Plain text on `mode`, empty when there is none.
    fn text(&self, mode: ClipboardMode) -> Result<String, HostError> {
        Ok(self
            .mime_data(mode)?
            .and_then(|data| data.text())
            .unwrap_or_default())
    }

    fn urls(&self, mode: ClipboardMode) -> Result<Vec<String>, HostError> {
        Ok(self
            .mime_data(mode)?
            .map(|data| data.urls())
            .unwrap_or_default())
    }
}
