use std::path::PathBuf;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Path to the catalog file. Defaults to $SHELF_CATALOG, then
    /// `<config dir>/shelf/catalog.toml`
    #[clap(long, global = true)]
    pub catalog: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: ShelfCommand,
}

/// Every lifecycle subcommand also accepts `help` in place of a binary
/// name to print its own usage and exit. The version is only parsed as
/// optional for that reason; real invocations always require it.
#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum ShelfCommand {
    /// Download one version of a binary into the parent directory
    Download {
        name: String,
        version: Option<String>,
    },
    /// Download a version and point the binary's link at it
    Install {
        name: String,
        version: Option<String>,
    },
    /// Point the binary's link at an already-downloaded version
    Link {
        name: String,
        version: Option<String>,
    },
    /// Delete one downloaded version, leaving any link in place
    Remove {
        name: String,
        version: Option<String>,
    },
    /// Remove a version and its link
    Uninstall {
        name: String,
        version: Option<String>,
    },
    /// Remove the binary's link, leaving the version on disk
    Unlink {
        name: String,
        version: Option<String>,
    },
    /// List catalog binaries, their downloaded versions and the linked one
    List,
}
