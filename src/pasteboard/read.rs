//! Read operations.
//!
//! Every read degrades to an empty value when there is nothing to read
//! or the host fails: no data is a normal outcome, never an error.
//!
//! `has_data`, `types`, `read_string` and `read_filenames` answer from
//! the pasteboard's binding. Plain-text, fragment and smart-replace
//! reads on copy/paste pasteboards go to the live host clipboard
//! instead, so they see what is there now rather than the snapshot
//! taken at construction.

use std::borrow::Cow;
use std::path::PathBuf;

use url::Url;

use super::Pasteboard;
use crate::editing::{ContentPolicy, EditingDocument};
use crate::mime::{self, MimeData, utf16};

/// Result of [`Pasteboard::read_fragment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRead<F> {
    /// The fragment, if either path produced one.
    pub fragment: Option<F>,
    /// Set once the plain-text path was taken, even if it produced
    /// nothing.
    pub chose_plain_text: bool,
}

impl Pasteboard<'_> {
    /// Whether the binding holds at least one type.
    pub fn has_data(&self) -> bool {
        self.read_data()
            .is_some_and(|data| data.formats().next().is_some())
    }

    /// Type identifiers on the binding, deduplicated, first-seen order.
    pub fn types(&self) -> Vec<String> {
        let Some(data) = self.read_data() else {
            return Vec::new();
        };
        let mut types: Vec<String> = Vec::new();
        for format in data.formats() {
            if !types.iter().any(|t| t == format) {
                types.push(format.to_owned());
            }
        }
        types
    }

    /// Plain text from the transfer target. Empty when there is none.
    pub fn read_plain_text(&self) -> String {
        if self.is_for_copy_and_paste() {
            let target = self.host_mode();
            return self.host.text(target).unwrap_or_else(|e| {
                tracing::warn!(error = %e, clipboard = ?target, "pasteboard: read_plain_text failed");
                String::new()
            });
        }
        self.read_data()
            .and_then(MimeData::text)
            .unwrap_or_default()
    }

    /// The string stored under `format`.
    ///
    /// HTML and plain-text types are answered from their native slots
    /// when present. Anything else is the raw entry for the literal
    /// identifier decoded as UTF-16. Missing data reads as `""`.
    pub fn read_string(&self, format: &str) -> String {
        let Some(data) = self.read_data() else {
            return String::new();
        };

        if mime::is_html_type(format) {
            if let Some(html) = data.html() {
                return html;
            }
        }
        if mime::is_text_type(format) {
            if let Some(text) = data.text() {
                return text;
            }
        }

        data.data(format).map(utf16::decode).unwrap_or_default()
    }

    /// Build an insertable fragment from the transfer target.
    ///
    /// Non-empty markup is tried first, parsed with scripts and plugins
    /// disallowed. If that yields nothing and `allow_plain_text` is set,
    /// a fragment is built from the plain text instead.
    pub fn read_fragment<D: EditingDocument>(
        &self,
        document: &D,
        context: &D::Range,
        allow_plain_text: bool,
    ) -> FragmentRead<D::Fragment> {
        let mut read = FragmentRead {
            fragment: None,
            chose_plain_text: false,
        };
        let Some(data) = self.transfer_data() else {
            return read;
        };

        if let Some(markup) = data.html().filter(|html| !html.is_empty()) {
            if let Some(fragment) =
                document.fragment_from_markup(&markup, ContentPolicy::DisallowScriptingAndPluginContent)
            {
                read.fragment = Some(fragment);
                return read;
            }
            tracing::debug!("pasteboard: markup did not parse, considering plain text");
        }

        if allow_plain_text {
            if let Some(text) = data.text() {
                read.chose_plain_text = true;
                read.fragment = document.fragment_from_text(context, &text);
            }
        }
        read
    }

    /// Local paths of the `file:` URLs on the binding. Other URLs are
    /// skipped.
    pub fn read_filenames(&self) -> Vec<PathBuf> {
        let Some(data) = self.read_data() else {
            return Vec::new();
        };
        data.urls()
            .iter()
            .filter_map(|raw| {
                let url = Url::parse(raw).ok()?;
                if url.scheme() != "file" {
                    return None;
                }
                match url.to_file_path() {
                    Ok(path) => Some(path),
                    Err(()) => {
                        tracing::debug!(url = %raw, "pasteboard: file URL has no local path");
                        None
                    }
                }
            })
            .collect()
    }

    /// Whether the transfer target carries the smart-paste marker.
    pub fn can_smart_replace(&self) -> bool {
        let marker = self.config.smart_paste_type.as_str();
        if self.is_for_copy_and_paste() {
            let target = self.host_mode();
            return self.host.has_format(marker, target).unwrap_or_else(|e| {
                tracing::warn!(error = %e, clipboard = ?target, "pasteboard: can_smart_replace failed");
                false
            });
        }
        self.read_data().is_some_and(|data| data.has_format(marker))
    }

    /// Data paste operations read: the live host clipboard for
    /// copy/paste pasteboards, the binding otherwise.
    fn transfer_data(&self) -> Option<Cow<'_, MimeData>> {
        if !self.is_for_copy_and_paste() {
            return self.read_data().map(Cow::Borrowed);
        }
        let target = self.host_mode();
        match self.host.mime_data(target) {
            Ok(data) => data.map(Cow::Owned),
            Err(e) => {
                tracing::warn!(error = %e, clipboard = ?target, "pasteboard: host read failed");
                None
            }
        }
    }
}
