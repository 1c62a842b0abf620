use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pasteboardctl", about = "Inspect and drive the host pasteboard")]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Target the primary selection instead of the clipboard
    #[arg(long, global = true)]
    pub selection: bool,

    /// xclip program to run
    #[arg(long, global = true, default_value = "xclip")]
    pub xclip: String,

    /// X display to use instead of $DISPLAY
    #[arg(long, global = true)]
    pub display: Option<String>,

    /// Wrap copied markup in a full HTML document
    #[arg(long, global = true)]
    pub wrap_markup: bool,

    /// Type identifier of the smart-paste marker
    #[arg(long, global = true)]
    pub smart_paste_type: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the types on the pasteboard
    Types,

    /// Print plain text, or the string stored under a type
    Read {
        /// Type identifier to read
        #[arg(long = "type")]
        format: Option<String>,
    },

    /// List local paths of dragged or copied files
    Files,

    /// Copy plain text
    WriteText {
        text: String,

        /// Mark the copy as eligible for smart replace
        #[arg(long)]
        smart: bool,
    },

    /// Copy a URL
    WriteUrl {
        url: String,

        #[arg(long, default_value = "")]
        title: String,
    },

    /// Copy a string under an arbitrary type
    Write {
        #[arg(long = "type")]
        format: String,

        data: String,
    },

    /// Clear one type, or everything
    Clear {
        #[arg(long = "type")]
        format: Option<String>,
    },

    /// Copy the primary selection onto the clipboard
    Promote,

    /// Report whether the pasteboard offers smart replace
    SmartReplace,

    /// Save the current pasteboard contents to a payload file
    Capture { path: PathBuf },

    /// Inspect a saved payload as if it were being dropped
    Drop {
        path: PathBuf,

        #[arg(long = "type")]
        format: Option<String>,
    },
}
