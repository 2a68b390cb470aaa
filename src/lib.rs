//! # Shelf Core Library
//!
//! This crate contains the core logic of the `shelf` tool – a local binary
//! version manager for developer tools.
//!
//! `shelf` keeps any number of versions of a tool side by side under a parent
//! directory (`<parent>/<name>/v<version>/<name>`) and exposes exactly one of
//! them on `PATH` through a per-name symlink in a link directory. Which
//! versions exist and which one is linked is always re-read from the
//! filesystem – there is no installation database to drift out of sync.
//!
//! This library is built for the `shelf` CLI, but you can also reuse it as a
//! backend in other tools.
//!
//! ## Modules Overview
//! - [`catalog`] – Parsing the declarative catalog file (names, download commands, directories)
//! - [`paths`] – Deriving artifact and link paths from (name, version)
//! - [`state`] – Inspecting filesystem state (`exists` / `is_linked`)
//! - [`validate`] – Gating names and versions before any operation runs
//! - [`lifecycle`] – The idempotent operations: download, link, install, remove, unlink, uninstall

pub mod catalog;
pub mod paths;
pub mod state;
pub mod validate;
pub mod lifecycle;

pub use catalog::*;
pub use paths::*;
pub use state::*;
pub use validate::*;
pub use lifecycle::*;
