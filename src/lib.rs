//! Pasteboard — clipboard and drag-and-drop transfer for editing code.
//!
//! An editing engine creates a [`Pasteboard`] per copy, paste, or drag,
//! writes a selection or typed strings to it, and reads typed content
//! back, without knowing how the host represents clipboard data. The
//! host itself sits behind [`host::ClipboardService`].

pub mod config;
pub mod editing;
pub mod host;
pub mod mime;
pub mod pasteboard;
pub mod payload;

pub use config::{PasteboardConfig, XclipConfig};
pub use pasteboard::{FragmentRead, Pasteboard, PasteboardUrl, SmartReplaceOption, TransferMode};
