use std::path::Path;
use anyhow::{anyhow, Result};
use clap::CommandFactory;
use colored::Colorize;
use shelf::catalog::Catalog;
use shelf::paths::ShelfPaths;
use shelf::{lifecycle, state, validate};
use crate::cli::{ShelfCommand, CLI};

pub fn execute(cli: CLI) -> Result<()> {
    let catalog_path = Catalog::locate(cli.catalog)?;
    match cli.command {
        ShelfCommand::Download { name, version } => {
            if let Some((catalog, paths, version)) = gate("download", &catalog_path, &name, version)? {
                lifecycle::download(&catalog, &paths, &name, &version)?;
            }
            Ok(())
        }
        ShelfCommand::Install { name, version } => {
            if let Some((catalog, paths, version)) = gate("install", &catalog_path, &name, version)? {
                lifecycle::install(&catalog, &paths, &name, &version)?;
            }
            Ok(())
        }
        ShelfCommand::Link { name, version } => {
            if let Some((_, paths, version)) = gate("link", &catalog_path, &name, version)? {
                lifecycle::link(&paths, &name, &version)?;
            }
            Ok(())
        }
        ShelfCommand::Remove { name, version } => {
            if let Some((_, paths, version)) = gate("remove", &catalog_path, &name, version)? {
                lifecycle::remove(&paths, &name, &version)?;
            }
            Ok(())
        }
        ShelfCommand::Uninstall { name, version } => {
            if let Some((_, paths, version)) = gate("uninstall", &catalog_path, &name, version)? {
                lifecycle::uninstall(&paths, &name, &version)?;
            }
            Ok(())
        }
        ShelfCommand::Unlink { name, version } => {
            if let Some((_, paths, version)) = gate("unlink", &catalog_path, &name, version)? {
                lifecycle::unlink(&paths, &name, &version)?;
            }
            Ok(())
        }
        ShelfCommand::List => execute_list(&catalog_path),
    }
}

/// The validation gate in front of every lifecycle operation.
///
/// Returns `None` when the name is the literal `help` token: the
/// subcommand's usage is printed and nothing else happens, even if a
/// catalog binary is actually called "help" (documented shadowing).
/// Otherwise the catalog is loaded, the version argument becomes
/// mandatory, and name/version are validated before any filesystem access.
fn gate(
    op: &str,
    catalog_path: &Path,
    name: &str,
    version: Option<String>,
) -> Result<Option<(Catalog, ShelfPaths, String)>> {
    if name == "help" {
        print_subcommand_help(op)?;
        return Ok(None);
    }
    let version = version
        .ok_or_else(|| anyhow!("Missing version after '{}' (see `shelf help {}`)", name, op))?;
    let catalog = Catalog::load(catalog_path)?;
    validate::validate(&catalog, name, &version)?;
    let paths = catalog.shelf_paths();
    Ok(Some((catalog, paths, version)))
}

fn print_subcommand_help(op: &str) -> Result<()> {
    let mut cmd = CLI::command();
    match cmd.find_subcommand_mut(op) {
        Some(sub) => sub.print_help()?,
        None => cmd.print_help()?,
    }
    Ok(())
}

pub fn execute_list(catalog_path: &Path) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    let paths = catalog.shelf_paths();
    for name in catalog.names() {
        println!("{}", name.bold());
        let versions = downloaded_versions(&paths.parent_dir.join(name))?;
        if versions.is_empty() {
            println!("  (no versions downloaded)");
            continue;
        }
        for version in versions {
            if state::is_linked(&paths, name, &version) {
                println!("  v{} {}", version, "(linked)".green());
            } else {
                println!("  v{}", version);
            }
        }
    }
    Ok(())
}

fn downloaded_versions(binary_dir: &Path) -> Result<Vec<String>> {
    let mut versions = Vec::new();
    if !binary_dir.exists() {
        return Ok(versions);
    }
    for entry in std::fs::read_dir(binary_dir)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if let Some(version) = file_name.strip_prefix('v') {
            versions.push(version.to_string());
        }
    }
    versions.sort();
    Ok(versions)
}
