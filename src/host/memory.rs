//! In-process clipboard service.
//!
//! Holds one entry set per [`ClipboardMode`]. Used as the host double in
//! tests and anywhere a pasteboard should not leak into the real
//! desktop clipboard.

use std::sync::{Mutex, MutexGuard};

use super::{ClipboardMode, ClipboardService, HostError};
use crate::mime::{Bitmap, MimeData};

#[derive(Debug, Default)]
struct Slots {
    clipboard: Option<MimeData>,
    selection: Option<MimeData>,
}

impl Slots {
    fn slot(&mut self, mode: ClipboardMode) -> &mut Option<MimeData> {
        match mode {
            ClipboardMode::Clipboard => &mut self.clipboard,
            ClipboardMode::Selection => &mut self.selection,
        }
    }
}

/// A clipboard that lives in process memory.
#[derive(Debug)]
pub struct MemoryClipboard {
    slots: Mutex<Slots>,
    supports_selection: bool,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryClipboard {
    /// A clipboard with both a regular clipboard and a primary selection.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
            supports_selection: true,
        }
    }

    /// A clipboard for hosts without a primary selection. Selection
    /// writes are dropped and selection reads see nothing.
    pub fn without_selection() -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
            supports_selection: false,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Slots>, HostError> {
        self.slots
            .lock()
            .map_err(|_| HostError::Unavailable("memory clipboard lock poisoned".into()))
    }

    fn ignores(&self, mode: ClipboardMode) -> bool {
        mode == ClipboardMode::Selection && !self.supports_selection
    }
}

impl ClipboardService for MemoryClipboard {
    fn mime_data(&self, mode: ClipboardMode) -> Result<Option<MimeData>, HostError> {
        if self.ignores(mode) {
            return Ok(None);
        }
        Ok(self.lock()?.slot(mode).clone())
    }

    fn set_mime_data(&self, data: Option<MimeData>, mode: ClipboardMode) -> Result<(), HostError> {
        if self.ignores(mode) {
            tracing::debug!(?mode, "memory clipboard: selection unsupported, write dropped");
            return Ok(());
        }
        *self.lock()?.slot(mode) = data;
        Ok(())
    }

    fn set_image(&self, image: &Bitmap, mode: ClipboardMode) -> Result<(), HostError> {
        let mut data = MimeData::new();
        data.set_image(image.clone());
        self.set_mime_data(Some(data), mode)
    }
}
