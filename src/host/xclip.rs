//! X11 clipboard service — read/write via `xclip`.
//!
//! `xclip -selection {clipboard,primary}` handles both host clipboards.
//! Reads list the owner's `TARGETS` and fetch each one; writes hand a
//! single representation to `xclip`, which forks and serves it until
//! another client takes ownership. X11 lets one `xclip` process offer
//! only one target, so a multi-entry write keeps the most useful entry
//! and drops the rest. Clearing talks to the X server directly and
//! gives up ownership of the selection, which makes `xclip` exit.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use x11rb::protocol::xproto;
use x11rb::rust_connection::RustConnection;

use super::{ClipboardMode, ClipboardService, HostError};
use crate::config::XclipConfig;
use crate::mime::{Bitmap, MimeData, TEXT_HTML, TEXT_PLAIN};

/// X11 bookkeeping targets that never carry user data.
const META_TARGETS: &[&str] = &[
    "TARGETS",
    "TIMESTAMP",
    "MULTIPLE",
    "SAVE_TARGETS",
    "DELETE",
    "INCR",
];

/// X11 targets that all mean "plain text".
const TEXT_TARGETS: &[&str] = &[
    "UTF8_STRING",
    "STRING",
    "TEXT",
    "COMPOUND_TEXT",
    "text/plain;charset=utf-8",
];

const UTF8_STRING: &str = "UTF8_STRING";
const IMAGE_PNG: &str = "image/png";

/// `ClipboardService` backed by the `xclip` command.
#[derive(Debug, Clone, Default)]
pub struct XclipClipboard {
    config: XclipConfig,
}

impl XclipClipboard {
    pub fn new(config: XclipConfig) -> Self {
        Self { config }
    }

    fn selection_arg(mode: ClipboardMode) -> &'static str {
        match mode {
            ClipboardMode::Clipboard => "clipboard",
            ClipboardMode::Selection => "primary",
        }
    }

    /// `-display <name>` when a display is configured.
    fn display_args(&self) -> Vec<&str> {
        match &self.config.display {
            Some(display) => vec!["-display", display.as_str()],
            None => Vec::new(),
        }
    }

    /// Give up ownership of the selection so no client offers data.
    fn release_selection(&self, mode: ClipboardMode) -> Result<(), HostError> {
        let (conn, _) = RustConnection::connect(self.config.display.as_deref())
            .map_err(|e| HostError::Unavailable(format!("X11 connect failed: {e}")))?;

        let selection = xproto::intern_atom(&conn, false, selection_atom(mode))
            .map_err(|e| HostError::Unavailable(format!("intern_atom: {e}")))?
            .reply()
            .map_err(|e| HostError::Unavailable(format!("intern_atom reply: {e}")))?
            .atom;

        xproto::set_selection_owner(&conn, x11rb::NONE, selection, x11rb::CURRENT_TIME)
            .map_err(|e| HostError::Unavailable(format!("set_selection_owner: {e}")))?
            .check()
            .map_err(|e| HostError::Unavailable(format!("set_selection_owner reply: {e}")))?;

        tracing::debug!(?mode, "xclip: selection ownership released");
        Ok(())
    }

    /// Run `xclip -o -t <target>`. `Ok(None)` when xclip reports the
    /// target (or any owner) missing.
    fn read_target(&self, target: &str, mode: ClipboardMode) -> Result<Option<Vec<u8>>, HostError> {
        let output = self.output(&[
            "-selection",
            Self::selection_arg(mode),
            "-t",
            target,
            "-o",
        ])?;

        if output.status.success() {
            Ok(Some(output.stdout))
        } else {
            tracing::debug!(x11_target = target, ?mode, status = %output.status, "xclip: target not available");
            Ok(None)
        }
    }

    fn output(&self, args: &[&str]) -> Result<Output, HostError> {
        Command::new(&self.config.program)
            .args(self.display_args())
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| {
                HostError::Command(format!("failed to spawn {} -o: {e}", self.config.program))
            })
    }

    fn write_target(&self, target: &str, content: &[u8], mode: ClipboardMode) -> Result<(), HostError> {
        let mut child = Command::new(&self.config.program)
            .args(self.display_args())
            .args(["-selection", Self::selection_arg(mode), "-t", target, "-i"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                HostError::Command(format!("failed to spawn {}: {e}", self.config.program))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(content) {
                drop(stdin);
                // Reap the child before reporting; it may still be running.
                let _ = child.kill();
                let _ = child.wait();
                return Err(e.into());
            }
            // Drop stdin to close the pipe so xclip can finish.
        }

        let status = child.wait()?;
        if status.success() {
            tracing::debug!(x11_target = target, ?mode, bytes = content.len(), "xclip: wrote target");
            Ok(())
        } else {
            Err(HostError::Command(format!(
                "{} exited with status {status}",
                self.config.program
            )))
        }
    }

    /// Offered targets as (type identifier, X11 target) pairs.
    fn targets(&self, mode: ClipboardMode) -> Result<Vec<(String, String)>, HostError> {
        let Some(raw) = self.read_target("TARGETS", mode)? else {
            return Ok(Vec::new());
        };
        Ok(map_targets(&String::from_utf8_lossy(&raw)))
    }
}

/// Map raw `TARGETS` output to type identifiers, folding the X11 text
/// aliases onto `text/plain` and dropping bookkeeping targets.
fn map_targets(raw: &str) -> Vec<(String, String)> {
    let mut mapped: Vec<(String, String)> = Vec::new();
    for target in raw.lines().map(str::trim).filter(|t| !t.is_empty()) {
        if META_TARGETS.contains(&target) {
            continue;
        }
        let format = if TEXT_TARGETS.contains(&target) {
            TEXT_PLAIN
        } else {
            target
        };
        match mapped.iter_mut().find(|(f, _)| f == format) {
            // Prefer the literal MIME target over an alias.
            Some(existing) if target == TEXT_PLAIN => existing.1 = target.to_owned(),
            Some(_) => {}
            None => mapped.push((format.to_owned(), target.to_owned())),
        }
    }
    mapped
}

/// Atom name of the X11 selection behind `mode`.
fn selection_atom(mode: ClipboardMode) -> &'static [u8] {
    match mode {
        ClipboardMode::Clipboard => b"CLIPBOARD",
        ClipboardMode::Selection => b"PRIMARY",
    }
}

/// Pick the single entry to hand to xclip: text, then HTML, then the
/// first remaining entry.
fn preferred_entry(data: &MimeData) -> Option<(&'static str, &str, &[u8])> {
    if let Some(text) = data.data(TEXT_PLAIN) {
        return Some((UTF8_STRING, TEXT_PLAIN, text));
    }
    if let Some(html) = data.data(TEXT_HTML) {
        return Some((TEXT_HTML, TEXT_HTML, html));
    }
    None
}

fn encode_png(image: &Bitmap) -> Result<Vec<u8>, HostError> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder
        .write_header()
        .map_err(|e| HostError::Image(format!("png header: {e}")))?;
    writer
        .write_image_data(&image.rgba)
        .map_err(|e| HostError::Image(format!("png data: {e}")))?;
    writer
        .finish()
        .map_err(|e| HostError::Image(format!("png finish: {e}")))?;
    Ok(out)
}

impl ClipboardService for XclipClipboard {
    fn mime_data(&self, mode: ClipboardMode) -> Result<Option<MimeData>, HostError> {
        let targets = self.targets(mode)?;
        if targets.is_empty() {
            return Ok(None);
        }

        let mut data = MimeData::new();
        for (format, target) in targets {
            if let Some(bytes) = self.read_target(&target, mode)? {
                data.set_data(format, bytes);
            }
        }
        Ok(Some(data))
    }

    fn set_mime_data(&self, data: Option<MimeData>, mode: ClipboardMode) -> Result<(), HostError> {
        let Some(data) = data else {
            return self.release_selection(mode);
        };

        if let Some((target, format, bytes)) = preferred_entry(&data) {
            let dropped = data.formats().filter(|f| *f != format).count();
            if dropped > 0 {
                tracing::debug!(format, dropped, "xclip: single target per owner, extra entries dropped");
            }
            return self.write_target(target, bytes, mode);
        }

        if let Some(entry) = data.entries().first() {
            let dropped = data.entries().len() - 1;
            if dropped > 0 {
                tracing::debug!(format = %entry.format, dropped, "xclip: single target per owner, extra entries dropped");
            }
            return self.write_target(&entry.format, &entry.data, mode);
        }

        match data.image() {
            Some(image) => self.set_image(image, mode),
            None => self.release_selection(mode),
        }
    }

    fn set_image(&self, image: &Bitmap, mode: ClipboardMode) -> Result<(), HostError> {
        let png = encode_png(image)?;
        self.write_target(IMAGE_PNG, &png, mode)
    }

    fn formats(&self, mode: ClipboardMode) -> Result<Vec<String>, HostError> {
        Ok(self
            .targets(mode)?
            .into_iter()
            .map(|(format, _)| format)
            .collect())
    }

    fn text(&self, mode: ClipboardMode) -> Result<String, HostError> {
        let bytes = self.read_target(UTF8_STRING, mode)?.unwrap_or_default();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_fold_text_aliases() {
        let mapped = map_targets("TARGETS\nTIMESTAMP\nUTF8_STRING\nSTRING\ntext/html\n");
        assert_eq!(
            mapped,
            vec![
                ("text/plain".to_string(), "UTF8_STRING".to_string()),
                ("text/html".to_string(), "text/html".to_string()),
            ]
        );
    }

    #[test]
    fn literal_text_target_preferred() {
        let mapped = map_targets("UTF8_STRING\ntext/plain\n");
        assert_eq!(
            mapped,
            vec![("text/plain".to_string(), "text/plain".to_string())]
        );
    }

    #[test]
    fn custom_targets_pass_through() {
        let mapped = map_targets("application/x-custom\n\n");
        assert_eq!(mapped[0].0, "application/x-custom");
    }

    #[test]
    fn text_preferred_over_html() {
        let mut md = MimeData::new();
        md.set_html("<b>x</b>");
        md.set_text("x");
        let (target, format, bytes) = preferred_entry(&md).unwrap();
        assert_eq!(target, UTF8_STRING);
        assert_eq!(format, TEXT_PLAIN);
        assert_eq!(bytes, b"x");
    }

    #[test]
    fn custom_only_has_no_preferred_entry() {
        let mut md = MimeData::new();
        md.set_data("application/x-custom", b"raw".to_vec());
        assert!(preferred_entry(&md).is_none());
    }

    #[test]
    fn png_has_signature() {
        let bitmap = Bitmap::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
        let png = encode_png(&bitmap).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn missing_program_is_command_error() {
        let host = XclipClipboard::new(XclipConfig {
            program: "/nonexistent/xclip-binary".into(),
            ..XclipConfig::default()
        });
        let err = host.formats(ClipboardMode::Clipboard).unwrap_err();
        assert!(matches!(err, HostError::Command(_)));
    }

    #[test]
    fn selection_atoms() {
        assert_eq!(selection_atom(ClipboardMode::Clipboard), b"CLIPBOARD");
        assert_eq!(selection_atom(ClipboardMode::Selection), b"PRIMARY");
    }

    #[test]
    fn display_is_passed_to_xclip() {
        let host = XclipClipboard::new(XclipConfig {
            display: Some(":7".into()),
            ..XclipConfig::default()
        });
        assert_eq!(host.display_args(), ["-display", ":7"]);
        assert!(XclipClipboard::default().display_args().is_empty());
    }

    #[test]
    fn clearing_releases_ownership_instead_of_writing() {
        // No xclip is ever run: the program does not exist, so a write
        // would fail with a command error. Clearing goes to the X server,
        // which is absent on this display.
        let host = XclipClipboard::new(XclipConfig {
            program: "/nonexistent/xclip-binary".into(),
            display: Some(":4091".into()),
        });
        for data in [None, Some(MimeData::new())] {
            let err = host
                .set_mime_data(data, ClipboardMode::Clipboard)
                .unwrap_err();
            assert!(matches!(err, HostError::Unavailable(_)), "{err}");
        }
    }

    #[test]
    #[cfg(unix)]
    fn failed_write_returns_io_error() {
        // `true` exits without reading, so a payload larger than the pipe
        // buffer fails with a broken pipe.
        let host = XclipClipboard::new(XclipConfig {
            program: "true".into(),
            ..XclipConfig::default()
        });
        let err = host
            .write_target(UTF8_STRING, &vec![b'x'; 1 << 20], ClipboardMode::Clipboard)
            .unwrap_err();
        assert!(matches!(err, HostError::Io(_)), "{err}");
    }
}
