//! Output formatting for `pasteboardctl`.
//!
//! Type listings are tables on stdout. String reads write the raw
//! string to stdout with no trailing newline so that piping works
//! (`pasteboardctl read --type text/html > page.html`).

use std::io::{self, Write};
use std::path::PathBuf;

/// Print type identifiers with the byte size of each entry.
pub fn print_entries(entries: &[(String, usize)]) {
    if entries.is_empty() {
        println!("No data");
        return;
    }

    println!("{:<48} {:>10}", "TYPE", "BYTES");
    println!("{}", "-".repeat(59));
    for (format, size) in entries {
        println!("{format:<48} {size:>10}");
    }
}

/// Write a string read from the pasteboard to stdout verbatim.
pub fn print_string(content: &str) -> Result<(), io::Error> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()
}

pub fn print_files(files: &[PathBuf]) {
    if files.is_empty() {
        println!("No files");
        return;
    }
    for f in files {
        println!("{}", f.display());
    }
}

pub fn print_flag(label: &str, value: bool) {
    println!("{label}: {}", if value { "yes" } else { "no" });
}
