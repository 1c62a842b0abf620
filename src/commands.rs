//! One-shot `pasteboardctl` commands.
//!
//! Each command builds the pasteboards it needs over an `xclip` host,
//! performs one transfer, prints the result, and returns.

use std::io;
use std::sync::Arc;

use pasteboard::host::{ClipboardMode, ClipboardService, XclipClipboard};
use pasteboard::mime::MimeData;
use pasteboard::payload::{self, PayloadError};
use pasteboard::{Pasteboard, PasteboardConfig, PasteboardUrl, SmartReplaceOption, XclipConfig};

use crate::cli::{Command, GlobalOptions};
use crate::format;

/// Command error type.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(String),
    #[error("payload: {0}")]
    Payload(#[from] PayloadError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run one command against the host clipboard.
pub fn run(command: Command, options: &GlobalOptions) -> Result<(), CommandError> {
    let host: Arc<dyn ClipboardService> = Arc::new(XclipClipboard::new(XclipConfig {
        program: options.xclip.clone(),
        display: options.display.clone(),
    }));
    let config = pasteboard_config(options);
    let open = || {
        let pb = if options.selection {
            Pasteboard::for_global_selection(host.clone())
        } else {
            Pasteboard::for_copy_and_paste(host.clone())
        };
        pb.with_config(config.clone())
    };

    match command {
        Command::Types => {
            format::print_entries(&entry_sizes(open().read_data()));
        }
        Command::Read { format: None } => {
            format::print_string(&open().read_plain_text())?;
        }
        Command::Read { format: Some(f) } => {
            format::print_string(&open().read_string(&f))?;
        }
        Command::Files => {
            format::print_files(&open().read_filenames());
        }
        Command::WriteText { text, smart } => {
            let option = if smart {
                SmartReplaceOption::CanSmartReplace
            } else {
                SmartReplaceOption::CannotSmartReplace
            };
            let mut pb = open();
            pb.write_plain_text(&text, option);
            let mode = pb.mode().clipboard_mode();
            if smart && !marker_reached_host(host.as_ref(), &config.smart_paste_type, mode) {
                eprintln!(
                    "pasteboardctl: warning: --smart has no effect, the host clipboard kept only the text"
                );
            }
        }
        Command::WriteUrl { url, title } => {
            validate_url(&url)?;
            open().write_url(&PasteboardUrl { url, title });
        }
        Command::Write { format: f, data } => {
            let mut staging = Pasteboard::private(host.clone()).with_config(config.clone());
            staging.write_string(&f, &data);
            open().write_pasteboard(&staging);
        }
        Command::Clear { format: Some(f) } => {
            // Stage a copy so clearing one type keeps the others.
            let mut target = open();
            let mut staging = Pasteboard::private(host.clone()).with_config(config.clone());
            staging.write_pasteboard(&target);
            staging.clear(&f);
            target.write_pasteboard(&staging);
        }
        Command::Clear { format: None } => {
            open().clear_all();
        }
        Command::Promote => {
            let selection = Pasteboard::for_global_selection(host.clone());
            Pasteboard::for_copy_and_paste(host.clone())
                .with_config(config.clone())
                .write_pasteboard(&selection);
        }
        Command::SmartReplace => {
            format::print_flag("smart replace", open().can_smart_replace());
        }
        Command::Capture { path } => {
            let pb = open();
            let empty = MimeData::new();
            payload::save(&path, pb.read_data().unwrap_or(&empty))?;
            println!("Saved {} types to {}", pb.types().len(), path.display());
        }
        Command::Drop { path, format: f } => {
            let drag = payload::load(&path)?;
            let pb = Pasteboard::for_drag_data(host.clone(), &drag).with_config(config.clone());
            match f {
                Some(f) => format::print_string(&pb.read_string(&f))?,
                None => {
                    format::print_entries(&entry_sizes(pb.read_data()));
                    format::print_files(&pb.read_filenames());
                }
            }
        }
    }

    Ok(())
}

fn pasteboard_config(options: &GlobalOptions) -> PasteboardConfig {
    let mut config = PasteboardConfig {
        wrap_markup_document: options.wrap_markup,
        ..PasteboardConfig::default()
    };
    if let Some(marker) = &options.smart_paste_type {
        config.smart_paste_type = marker.clone();
    }
    config
}

/// Whether the host clipboard offers the smart-paste marker after a
/// smart write. `xclip` serves one target per write, so it never does.
fn marker_reached_host(host: &dyn ClipboardService, marker: &str, mode: ClipboardMode) -> bool {
    match host.has_format(marker, mode) {
        Ok(present) => {
            if !present {
                tracing::warn!(marker, ?mode, "smart-paste marker not offered by the host");
            }
            present
        }
        Err(e) => {
            tracing::warn!(error = %e, ?mode, "could not check for the smart-paste marker");
            false
        }
    }
}

/// Reject empty URLs before they reach the pasteboard, which treats
/// them as a programming error.
fn validate_url(url: &str) -> Result<(), CommandError> {
    if url.trim().is_empty() {
        Err(CommandError::Usage("URL must not be empty".into()))
    } else {
        Ok(())
    }
}

fn entry_sizes(data: Option<&MimeData>) -> Vec<(String, usize)> {
    data.map(|d| {
        d.entries()
            .iter()
            .map(|e| (e.format.clone(), e.data.len()))
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> GlobalOptions {
        GlobalOptions {
            selection: false,
            xclip: "/nonexistent/xclip-binary".into(),
            display: None,
            wrap_markup: false,
            smart_paste_type: None,
        }
    }

    #[test]
    fn validate_url_rejects_empty() {
        let err = validate_url("  ").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
        assert!(validate_url("https://example.com/").is_ok());
    }

    #[test]
    fn config_from_options() {
        let mut opts = options();
        opts.wrap_markup = true;
        opts.smart_paste_type = Some("application/x-smart".into());
        let config = pasteboard_config(&opts);
        assert!(config.wrap_markup_document);
        assert_eq!(config.smart_paste_type, "application/x-smart");
    }

    #[test]
    fn default_marker_kept() {
        let config = pasteboard_config(&options());
        assert_eq!(config.smart_paste_type, PasteboardConfig::default().smart_paste_type);
    }

    #[test]
    fn entry_sizes_lists_bytes() {
        let mut md = MimeData::new();
        md.set_text("four");
        md.set_data("application/x-zero", Vec::new());
        assert_eq!(
            entry_sizes(Some(&md)),
            vec![("text/plain".to_string(), 4), ("application/x-zero".to_string(), 0)]
        );
        assert!(entry_sizes(None).is_empty());
    }

    #[test]
    fn smart_marker_check_reads_host() {
        use pasteboard::host::MemoryClipboard;

        let host: Arc<dyn ClipboardService> = Arc::new(MemoryClipboard::new());
        let config = PasteboardConfig::default();
        let marker = config.smart_paste_type.as_str();

        let mut pb = Pasteboard::for_copy_and_paste(host.clone());
        pb.write_plain_text("kept", SmartReplaceOption::CanSmartReplace);
        assert!(marker_reached_host(host.as_ref(), marker, ClipboardMode::Clipboard));

        // Only the text survives, as on a single-target host.
        let mut text_only = MimeData::new();
        text_only.set_text("kept");
        host.set_mime_data(Some(text_only), ClipboardMode::Clipboard)
            .unwrap();
        assert!(!marker_reached_host(host.as_ref(), marker, ClipboardMode::Clipboard));
    }

    #[test]
    fn smart_marker_check_fails_closed_without_host() {
        let host = XclipClipboard::new(XclipConfig {
            program: "/nonexistent/xclip-binary".into(),
            ..XclipConfig::default()
        });
        assert!(!marker_reached_host(&host, "application/x-smart", ClipboardMode::Clipboard));
    }

    #[test]
    fn capture_without_host_saves_empty_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.msgpack");
        run(Command::Capture { path: path.clone() }, &options()).unwrap();
        let drag = payload::load(&path).unwrap();
        assert!(drag.platform_data().is_empty());
    }

    #[test]
    fn drop_reads_saved_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drag.msgpack");
        let mut md = MimeData::new();
        md.set_text("dropped");
        payload::save(&path, &md).unwrap();
        run(
            Command::Drop {
                path,
                format: Some("text/plain".into()),
            },
            &options(),
        )
        .unwrap();
    }

    #[test]
    fn write_url_empty_is_usage_error() {
        let err = run(
            Command::WriteUrl {
                url: String::new(),
                title: String::new(),
            },
            &options(),
        )
        .unwrap_err();
        assert!(matches!(err, CommandError::Usage(_)));
    }
}
