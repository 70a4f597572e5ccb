//! Subcommands of the `unopath` tool.

use clap::Subcommand;

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the installation directory (exit code 1 when none is found)
    Find,

    /// Show what every discovery strategy did
    Explain {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a legacy `file://` location URL into a local path
    DecodeUrl {
        /// URL as written in the legacy version file
        url: String,
    },
}
