use std::path::Path;
use crate::paths::ShelfPaths;

/// Checks whether the artifact for (name, version) is present on disk.
///
/// Any filesystem entry at the artifact path counts, regardless of type.
pub fn exists(paths: &ShelfPaths, name: &str, version: &str) -> bool {
    std::fs::symlink_metadata(paths.artifact_file(name, version)).is_ok()
}

/// Checks whether the name's link slot currently points at exactly this
/// version's artifact path.
///
/// The comparison is on the link target string, not on what it resolves to:
/// a dangling link still counts as linked. A missing slot, or a slot that is
/// not a symlink, is simply "not linked" – never an error.
pub fn is_linked(paths: &ShelfPaths, name: &str, version: &str) -> bool {
    link_target(&paths.link_path(name))
        .map(|target| target == paths.artifact_file(name, version))
        .unwrap_or(false)
}

fn link_target(link: &Path) -> Option<std::path::PathBuf> {
    std::fs::read_link(link).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, ShelfPaths) {
        let dir = tempdir().unwrap();
        let paths = ShelfPaths::new(dir.path().join("tools"), dir.path().join("bin"));
        fs::create_dir_all(&paths.parent_dir).unwrap();
        fs::create_dir_all(&paths.link_dir).unwrap();
        (dir, paths)
    }

    fn place_artifact(paths: &ShelfPaths, name: &str, version: &str) {
        let file = paths.artifact_file(name, version);
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "#!/bin/sh\n").unwrap();
    }

    #[test]
    fn test_exists_false_without_artifact() {
        let (_dir, paths) = setup();
        assert!(!exists(&paths, "just", "1.0.0"));
    }

    #[test]
    fn test_exists_true_with_artifact() {
        let (_dir, paths) = setup();
        place_artifact(&paths, "just", "1.0.0");
        assert!(exists(&paths, "just", "1.0.0"));
        assert!(!exists(&paths, "just", "1.0.1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_linked_matches_exact_target() {
        use std::os::unix::fs::symlink;
        let (_dir, paths) = setup();
        place_artifact(&paths, "just", "1.0.0");
        symlink(paths.artifact_file("just", "1.0.0"), paths.link_path("just")).unwrap();

        assert!(is_linked(&paths, "just", "1.0.0"));
        assert!(!is_linked(&paths, "just", "2.0.0"));
        assert!(!is_linked(&paths, "rg", "1.0.0"));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_still_counts_as_linked() {
        use std::os::unix::fs::symlink;
        let (_dir, paths) = setup();
        symlink(paths.artifact_file("just", "1.0.0"), paths.link_path("just")).unwrap();

        assert!(!exists(&paths, "just", "1.0.0"));
        assert!(is_linked(&paths, "just", "1.0.0"));
    }

    #[test]
    fn test_missing_slot_is_not_linked() {
        let (_dir, paths) = setup();
        assert!(!is_linked(&paths, "just", "1.0.0"));
    }

    #[test]
    fn test_regular_file_in_slot_is_not_linked() {
        let (_dir, paths) = setup();
        fs::write(paths.link_path("just"), "not a symlink").unwrap();
        assert!(!is_linked(&paths, "just", "1.0.0"));
    }
}
