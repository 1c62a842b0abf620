//! Write operations.
//!
//! Whole-transfer writes (selection, plain text, URL, image, another
//! pasteboard) assemble a fresh entry set and commit it: copy/paste
//! pasteboards push it to the host, drag-and-drop and private ones make
//! it their writable buffer. `write_string` and `clear` edit the
//! writable buffer entry by entry.

use super::{Binding, Pasteboard};
use crate::editing::{EditingDocument, ImageElement, TextSerialization};
use crate::mime::{self, Bitmap, MimeData, utf16};

const MARKUP_DOCUMENT_PREFIX: &str = "<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\" /></head><body>";
const MARKUP_DOCUMENT_SUFFIX: &str = "</body></html>";

/// Whether a later paste may treat the transfer as a smart replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartReplaceOption {
    CanSmartReplace,
    CannotSmartReplace,
}

/// A URL with an optional human-readable title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteboardUrl {
    pub url: String,
    pub title: String,
}

/// Replace non-breaking spaces with ordinary spaces.
fn normalize_spaces(text: &str) -> String {
    text.replace('\u{a0}', " ")
}

impl Pasteboard<'_> {
    /// Copy the current selection as plain text and interchange markup.
    ///
    /// With `can_smart_copy_or_delete`, a zero-length smart-paste marker
    /// entry is added so a later paste can offer smart replace.
    pub fn write_selection<D: EditingDocument>(
        &mut self,
        document: &D,
        range: &D::Range,
        can_smart_copy_or_delete: bool,
        serialization: TextSerialization,
    ) {
        let mut data = MimeData::new();
        data.set_text(&normalize_spaces(&document.selected_text(serialization)));

        let markup = document.serialize_markup(range);
        if self.config.wrap_markup_document {
            let wrapped = format!("{MARKUP_DOCUMENT_PREFIX}{markup}{MARKUP_DOCUMENT_SUFFIX}");
            data.set_data(mime::TEXT_HTML, wrapped.into_bytes());
        } else {
            data.set_html(&markup);
        }

        if can_smart_copy_or_delete {
            data.set_data(self.config.smart_paste_type.clone(), Vec::new());
        }

        self.commit(data, "write_selection");
    }

    /// Copy `text` as the only text entry, with non-breaking spaces
    /// normalized.
    pub fn write_plain_text(&mut self, text: &str, smart_replace: SmartReplaceOption) {
        let mut data = MimeData::new();
        data.set_text(&normalize_spaces(text));
        if smart_replace == SmartReplaceOption::CanSmartReplace {
            data.set_data(self.config.smart_paste_type.clone(), Vec::new());
        }
        self.commit(data, "write_plain_text");
    }

    /// Copy a URL as both text and a one-element URL list.
    ///
    /// # Panics
    ///
    /// Panics if `url.url` is empty; callers must not offer empty URLs.
    pub fn write_url(&mut self, url: &PasteboardUrl) {
        assert!(!url.url.is_empty(), "write_url called with an empty URL");

        let mut data = MimeData::new();
        data.set_text(&url.url);
        data.set_urls(&[url.url.as_str()]);
        self.commit(data, "write_url");
    }

    /// Copy the rendered image of `element`. Does nothing when the
    /// element has no usable bitmap.
    pub fn write_image(&mut self, element: &impl ImageElement) {
        let image = match element.rendered_image() {
            Ok(image) => image,
            Err(reason) => {
                tracing::debug!(%reason, "pasteboard: write_image skipped");
                return;
            }
        };

        if self.is_for_copy_and_paste() {
            let target = self.host_mode();
            match self.host.set_image(&image, target) {
                Ok(()) => tracing::debug!(width = image.width, height = image.height, clipboard = ?target, "pasteboard: image pushed to host"),
                Err(e) => tracing::warn!(error = %e, clipboard = ?target, "pasteboard: write_image failed"),
            }
        } else {
            let mut data = MimeData::new();
            data.set_image(image);
            self.binding = Binding::Writable(data);
        }
    }

    /// Set one entry in the writable buffer, creating the buffer on
    /// first use.
    ///
    /// Plain-text and HTML types go to their native slots. Any other
    /// type stores `data` as native-endian UTF-16 bytes under the
    /// literal type identifier.
    pub fn write_string(&mut self, format: &str, data: &str) {
        let mut buffer = self.take_writable();
        if mime::is_text_type(format) {
            buffer.set_text(data);
        } else if mime::is_html_type(format) {
            buffer.set_html(data);
        } else {
            buffer.set_data(format, utf16::encode(data));
        }
        self.binding = Binding::Writable(buffer);
    }

    /// Remove one type from the writable buffer.
    ///
    /// A buffer left empty is released. Copy/paste pasteboards then push
    /// whatever remains (possibly nothing) to the host so it reflects the
    /// removal.
    pub fn clear(&mut self, format: &str) {
        if let Binding::Writable(data) = &mut self.binding {
            data.remove_format(format);
            if data.is_empty() {
                if self.mode.is_for_drag_and_drop() {
                    tracing::debug!(format, "pasteboard: drag buffer emptied, releasing it");
                }
                self.binding = Binding::Unbound;
            }
        }

        if self.is_for_copy_and_paste() {
            self.push_to_host(self.clipboard_data().cloned(), "clear");
        }
    }

    /// Remove everything. Copy/paste pasteboards clear the host
    /// clipboard; all pasteboards drop their writable buffer.
    pub fn clear_all(&mut self) {
        if self.is_for_copy_and_paste() {
            self.push_to_host(None, "clear_all");
        }
        if matches!(self.binding, Binding::Writable(_)) {
            self.binding = Binding::Unbound;
        }
    }

    /// Copy every entry of `source` onto this pasteboard's target, e.g.
    /// to promote the primary selection to the clipboard.
    pub fn write_pasteboard(&mut self, source: &Pasteboard<'_>) {
        match source.read_data().cloned() {
            Some(data) => self.commit(data, "write_pasteboard"),
            None if self.is_for_copy_and_paste() => self.push_to_host(None, "write_pasteboard"),
            None => {
                if matches!(self.binding, Binding::Writable(_)) {
                    self.binding = Binding::Unbound;
                }
            }
        }
    }

    /// Drag images are not supported; the call is accepted and ignored.
    pub fn set_drag_image(&mut self, image: &Bitmap, hot_spot: (i32, i32)) {
        tracing::debug!(
            width = image.width,
            height = image.height,
            hot_x = hot_spot.0,
            hot_y = hot_spot.1,
            "pasteboard: set_drag_image not implemented"
        );
    }

    fn commit(&mut self, data: MimeData, operation: &'static str) {
        if self.is_for_copy_and_paste() {
            self.push_to_host(Some(data), operation);
        } else {
            tracing::debug!(operation, mode = ?self.mode, entries = data.entries().len(), "pasteboard: committed to writable buffer");
            self.binding = Binding::Writable(data);
        }
    }

    fn push_to_host(&self, data: Option<MimeData>, operation: &'static str) {
        let target = self.host_mode();
        let entries = data.as_ref().map_or(0, |d| d.entries().len());
        match self.host.set_mime_data(data, target) {
            Ok(()) => tracing::debug!(operation, clipboard = ?target, entries, "pasteboard: pushed to host"),
            Err(e) => tracing::warn!(operation, error = %e, clipboard = ?target, "pasteboard: host write failed"),
        }
    }
}
