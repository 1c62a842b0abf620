//! Pasteboard — one clipboard or drag-and-drop transfer.
//!
//! A pasteboard is created for a single operation (one copy, one paste
//! query, one drag session) and dropped afterwards. Its transfer mode is
//! fixed at construction and decides where writes land:
//!
//! - copy/paste and selection pasteboards push to the host clipboard
//!   through the injected [`ClipboardService`];
//! - drag-and-drop and private pasteboards keep data in their own
//!   writable buffer.
//!
//! The data a pasteboard answers reads from is its binding: nothing,
//! read-only data supplied from outside (a host snapshot or a drag
//! payload), or a buffer the pasteboard owns. The two bound states are
//! variants of one enum, so a pasteboard can never hold both.

mod read;
mod write;

#[cfg(test)]
mod testing;

use std::borrow::Cow;
use std::sync::Arc;

pub use read::FragmentRead;
pub use write::{PasteboardUrl, SmartReplaceOption};

use crate::config::PasteboardConfig;
use crate::editing::DragData;
use crate::host::{ClipboardMode, ClipboardService};
use crate::mime::MimeData;

/// What kind of transfer a pasteboard represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// Bound to the host's regular clipboard.
    CopyAndPaste,
    /// Bound to the host's primary selection.
    GlobalSelection,
    /// Bound to an in-flight drag.
    DragAndDrop,
    /// Bound to nothing outside the instance.
    Private,
}

impl TransferMode {
    pub fn is_for_copy_and_paste(self) -> bool {
        matches!(self, Self::CopyAndPaste | Self::GlobalSelection)
    }

    pub fn is_for_drag_and_drop(self) -> bool {
        self == Self::DragAndDrop
    }

    /// Host clipboard addressed by this mode.
    pub fn clipboard_mode(self) -> ClipboardMode {
        match self {
            Self::GlobalSelection => ClipboardMode::Selection,
            _ => ClipboardMode::Clipboard,
        }
    }
}

/// The data a pasteboard is bound to.
#[derive(Debug)]
enum Binding<'a> {
    Unbound,
    /// Externally supplied data. Never mutated.
    Readable(Cow<'a, MimeData>),
    /// Data this pasteboard created and owns.
    Writable(MimeData),
}

/// A single transfer operation over a host clipboard or drag payload.
pub struct Pasteboard<'a> {
    host: Arc<dyn ClipboardService>,
    config: PasteboardConfig,
    mode: TransferMode,
    binding: Binding<'a>,
}

impl Pasteboard<'static> {
    /// A pasteboard over the host clipboard, bound to a snapshot of its
    /// current contents.
    pub fn for_copy_and_paste(host: Arc<dyn ClipboardService>) -> Self {
        Self::bound_to_host(host, TransferMode::CopyAndPaste)
    }

    /// Like [`Pasteboard::for_copy_and_paste`], but every host
    /// interaction targets the primary selection.
    pub fn for_global_selection(host: Arc<dyn ClipboardService>) -> Self {
        Self::bound_to_host(host, TransferMode::GlobalSelection)
    }

    /// A drag-and-drop pasteboard with no payload yet, for the source
    /// side of a drag to fill.
    pub fn for_drag_and_drop(host: Arc<dyn ClipboardService>) -> Self {
        Self::with_binding(host, TransferMode::DragAndDrop, Binding::Unbound)
    }

    /// A pasteboard that never reads from the host.
    pub fn private(host: Arc<dyn ClipboardService>) -> Self {
        Self::with_binding(host, TransferMode::Private, Binding::Unbound)
    }

    fn bound_to_host(host: Arc<dyn ClipboardService>, mode: TransferMode) -> Self {
        let target = mode.clipboard_mode();
        let binding = match host.mime_data(target) {
            Ok(Some(snapshot)) => Binding::Readable(Cow::Owned(snapshot)),
            Ok(None) => Binding::Unbound,
            Err(e) => {
                tracing::warn!(error = %e, clipboard = ?target, "pasteboard: host snapshot failed, starting unbound");
                Binding::Unbound
            }
        };
        Self::with_binding(host, mode, binding)
    }
}

impl<'a> Pasteboard<'a> {
    /// A drop-side pasteboard reading the payload of `drag`. The payload
    /// is borrowed for the lifetime of the pasteboard.
    pub fn for_drag_data(host: Arc<dyn ClipboardService>, drag: &'a DragData) -> Self {
        Self::with_binding(
            host,
            TransferMode::DragAndDrop,
            Binding::Readable(Cow::Borrowed(drag.platform_data())),
        )
    }

    fn with_binding(host: Arc<dyn ClipboardService>, mode: TransferMode, binding: Binding<'a>) -> Self {
        tracing::debug!(?mode, bound = !matches!(binding, Binding::Unbound), "pasteboard: created");
        Self {
            host,
            config: PasteboardConfig::default(),
            mode,
            binding,
        }
    }

    /// Replace the default configuration.
    pub fn with_config(mut self, config: PasteboardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn mode(&self) -> TransferMode {
        self.mode
    }

    pub fn is_for_copy_and_paste(&self) -> bool {
        self.mode.is_for_copy_and_paste()
    }

    pub fn is_for_drag_and_drop(&self) -> bool {
        self.mode.is_for_drag_and_drop()
    }

    /// The active binding's data: readable if bound to external data,
    /// otherwise the writable buffer.
    pub fn read_data(&self) -> Option<&MimeData> {
        match &self.binding {
            Binding::Unbound => None,
            Binding::Readable(data) => Some(data.as_ref()),
            Binding::Writable(data) => Some(data),
        }
    }

    /// The writable buffer, if this pasteboard has created one.
    pub fn clipboard_data(&self) -> Option<&MimeData> {
        match &self.binding {
            Binding::Writable(data) => Some(data),
            _ => None,
        }
    }

    /// Take the writable buffer out of the binding, or a fresh one if
    /// there is none. Readable data is released when a pasteboard starts
    /// writing. Callers put the buffer back as `Binding::Writable`.
    fn take_writable(&mut self) -> MimeData {
        match std::mem::replace(&mut self.binding, Binding::Unbound) {
            Binding::Writable(data) => data,
            Binding::Readable(_) => {
                tracing::debug!(mode = ?self.mode, "pasteboard: releasing readable binding for write");
                MimeData::new()
            }
            Binding::Unbound => MimeData::new(),
        }
    }

    fn host_mode(&self) -> ClipboardMode {
        self.mode.clipboard_mode()
    }
}

impl Drop for Pasteboard<'_> {
    fn drop(&mut self) {
        match (&self.binding, self.is_for_copy_and_paste()) {
            (Binding::Writable(_), true) => {
                tracing::trace!(mode = ?self.mode, "pasteboard: dropping local handle, host keeps its copy");
            }
            (Binding::Writable(data), false) => {
                tracing::trace!(mode = ?self.mode, entries = data.entries().len(), "pasteboard: freeing writable buffer");
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for Pasteboard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pasteboard")
            .field("mode", &self.mode)
            .field("binding", &self.binding)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
