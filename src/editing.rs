//! Collaborator boundaries on the editing side.
//!
//! The pasteboard never inspects documents, renders markup, or decodes
//! images itself. It asks an [`EditingDocument`] for text, markup and
//! fragments, an [`ImageElement`] for pixels, and reads drop data out of
//! a [`DragData`].

use crate::mime::{Bitmap, MimeData};

/// How selected text is flattened for a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSerialization {
    /// The selection's visible text.
    SelectedText,
    /// Visible text with image alt text folded in.
    IncludeImageAltText,
}

/// What a fragment built from pasted markup may keep. Pasted markup is
/// always parsed with scripts and plugins stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPolicy {
    DisallowScriptingAndPluginContent,
}

/// The editing engine a pasteboard copies from and pastes into.
pub trait EditingDocument {
    /// A selected or insertion range.
    type Range;
    /// Parsed content ready for insertion.
    type Fragment;

    /// Text of the current selection.
    fn selected_text(&self, serialization: TextSerialization) -> String;

    /// Markup for `range`, annotated for interchange and with non-local
    /// URLs resolved.
    fn serialize_markup(&self, range: &Self::Range) -> String;

    /// Parse pasted markup. `None` when it cannot be parsed.
    fn fragment_from_markup(&self, markup: &str, policy: ContentPolicy) -> Option<Self::Fragment>;

    /// Build a fragment from pasted plain text for insertion at `context`.
    fn fragment_from_text(&self, context: &Self::Range, text: &str) -> Option<Self::Fragment>;
}

/// Why an element could not produce a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ImageUnavailable {
    #[error("element is not rendered as an image")]
    NotAnImage,
    #[error("no cached image")]
    NotCached,
    #[error("image failed to load")]
    LoadFailed,
    #[error("no bitmap for the current frame")]
    NoCurrentFrame,
}

/// A document element that may be rendered as an image.
pub trait ImageElement {
    fn rendered_image(&self) -> Result<Bitmap, ImageUnavailable>;
}

/// Read-only data carried by an in-flight drag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragData {
    data: MimeData,
}

impl DragData {
    pub fn new(data: MimeData) -> Self {
        Self { data }
    }

    pub fn platform_data(&self) -> &MimeData {
        &self.data
    }
}

impl From<MimeData> for DragData {
    fn from(data: MimeData) -> Self {
        Self::new(data)
    }
}
