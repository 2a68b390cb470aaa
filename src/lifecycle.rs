use std::path::Path;
use std::process::Command;
use anyhow::{bail, Context, Result};
use walkdir::WalkDir;
use crate::catalog::Catalog;
use crate::paths::ShelfPaths;
use crate::state;

/// Fetches one version of a binary into its artifact directory.
///
/// Idempotent: if the artifact is already present, nothing runs and the
/// call reports that and returns Ok.
pub fn download(catalog: &Catalog, paths: &ShelfPaths, name: &str, version: &str) -> Result<()> {
    if state::exists(paths, name, version) {
        println!("{} v{} already exists", name, version);
        return Ok(());
    }
    fetch(catalog, paths, name, version)?;
    println!("Downloaded {} v{}", name, version);
    Ok(())
}

/// Points the name's link slot at this version's artifact, replacing
/// whatever the slot pointed at before. Last writer wins; the artifact
/// does not have to exist (a dangling link is a valid state).
pub fn link(paths: &ShelfPaths, name: &str, version: &str) -> Result<()> {
    if state::is_linked(paths, name, version) {
        println!("{} v{} already linked", name, version);
        return Ok(());
    }
    let link = paths.link_path(name);
    std::fs::create_dir_all(&paths.link_dir)
        .with_context(|| format!("Could not create link dir {}", paths.link_dir.display()))?;
    if std::fs::symlink_metadata(&link).is_ok() {
        std::fs::remove_file(&link)
            .with_context(|| format!("Could not replace link {}", link.display()))?;
    }
    create_link(&paths.artifact_file(name, version), &link)?;
    println!("Linked {} -> v{}", name, version);
    Ok(())
}

/// `download` then `link`. Both guards are evaluated independently, so an
/// existing artifact still gets linked and each half reports its own
/// "already ..." state.
pub fn install(catalog: &Catalog, paths: &ShelfPaths, name: &str, version: &str) -> Result<()> {
    download(catalog, paths, name, version)?;
    link(paths, name, version)
}

/// Deletes this version's artifact directory. The link slot is left
/// untouched, even if it now dangles.
pub fn remove(paths: &ShelfPaths, name: &str, version: &str) -> Result<()> {
    if !state::exists(paths, name, version) {
        println!("{} v{} does not exist", name, version);
        return Ok(());
    }
    let dir = paths.artifact_dir(name, version);
    std::fs::remove_dir_all(&dir)
        .with_context(|| format!("Could not remove {}", dir.display()))?;
    println!("Removed {} v{}", name, version);
    Ok(())
}

/// Deletes the name's link slot if it points at this version. The guard is
/// exactly `is_linked(name, version)`: a slot pointing at some other
/// version is reported as "not linked" and left alone.
pub fn unlink(paths: &ShelfPaths, name: &str, version: &str) -> Result<()> {
    if !state::is_linked(paths, name, version) {
        println!("{} v{} not linked", name, version);
        return Ok(());
    }
    let link = paths.link_path(name);
    std::fs::remove_file(&link)
        .with_context(|| format!("Could not remove link {}", link.display()))?;
    println!("Unlinked {}", name);
    Ok(())
}

/// `remove` then `unlink`, each with its own guard and report.
pub fn uninstall(paths: &ShelfPaths, name: &str, version: &str) -> Result<()> {
    remove(paths, name, version)?;
    unlink(paths, name, version)
}

/// The fetch action behind `download`/`install`: prepare an empty artifact
/// directory, run the catalog's download commands inside it, mark the
/// artifact executable, then delete everything else the commands left
/// behind. Checksum commands are reserved and never run here.
fn fetch(catalog: &Catalog, paths: &ShelfPaths, name: &str, version: &str) -> Result<()> {
    let dir = paths.artifact_dir(name, version);
    if dir.exists() {
        std::fs::remove_dir_all(&dir)
            .with_context(|| format!("Could not clear {}", dir.display()))?;
    }
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create {}", dir.display()))?;

    for line in catalog.download_commands(name, version)? {
        run_command(&line, &dir)?;
    }

    let artifact = paths.artifact_file(name, version);
    set_executable(&artifact).with_context(|| {
        format!("Download commands did not produce {}", artifact.display())
    })?;
    sweep_extras(&dir, name)?;
    Ok(())
}

/// Runs one opaque catalog command line in `dir` through the shell and
/// fails on a non-zero exit status. This is the whole trust boundary for
/// catalog-supplied commands.
fn run_command(line: &str, dir: &Path) -> Result<()> {
    #[cfg(unix)]
    let status = Command::new("sh")
        .arg("-c")
        .arg(line)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Could not spawn command: {}", line))?;
    #[cfg(windows)]
    let status = Command::new("cmd")
        .args(["/C", line])
        .current_dir(dir)
        .status()
        .with_context(|| format!("Could not spawn command: {}", line))?;

    if !status.success() {
        bail!("Download command failed ({}): {}", status, line);
    }
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(windows)]
fn set_executable(path: &Path) -> Result<()> {
    std::fs::metadata(path)?;
    Ok(())
}

#[cfg(unix)]
fn create_link(target: &Path, link: &Path) -> Result<()> {
    use std::os::unix::fs::symlink;
    symlink(target, link)
        .with_context(|| format!("Could not create link {}", link.display()))?;
    Ok(())
}

#[cfg(windows)]
fn create_link(target: &Path, link: &Path) -> Result<()> {
    use std::os::windows::fs::symlink_file;
    symlink_file(target, link)
        .with_context(|| format!("Could not create link {}", link.display()))?;
    Ok(())
}

/// Deletes every entry in the artifact directory except the artifact
/// itself (download commands may leave archives or scratch files behind).
fn sweep_extras(dir: &Path, keep: &str) -> Result<()> {
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_name().to_string_lossy() == keep {
            continue;
        }
        if entry.file_type().is_dir() {
            std::fs::remove_dir_all(entry.path())?;
        } else {
            std::fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}
