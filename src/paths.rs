use std::path::{Path, PathBuf};

/// The two directories every operation works against, resolved once at
/// startup from the catalog and passed by reference into each component.
///
/// All path derivation is pure: the same (name, version) always maps to the
/// same artifact paths, and distinct pairs never collide because name and
/// version occupy separate path components.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfPaths {
    /// Root under which per-version artifacts live (`<parent>/<name>/v<version>/`).
    pub parent_dir: PathBuf,
    /// Directory holding one symlink per binary name.
    pub link_dir: PathBuf,
}

impl ShelfPaths {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(parent_dir: P, link_dir: Q) -> Self {
        ShelfPaths {
            parent_dir: parent_dir.as_ref().to_path_buf(),
            link_dir: link_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding exactly one version of one binary.
    pub fn artifact_dir(&self, name: &str, version: &str) -> PathBuf {
        self.parent_dir.join(name).join(format!("v{version}"))
    }

    /// The single executable inside [`ShelfPaths::artifact_dir`].
    pub fn artifact_file(&self, name: &str, version: &str) -> PathBuf {
        self.artifact_dir(name, version).join(name)
    }

    /// The name's link slot. One per name, shared across all versions.
    pub fn link_path(&self, name: &str) -> PathBuf {
        self.link_dir.join(name)
    }
}
