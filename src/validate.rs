use anyhow::{bail, Result};
use regex::Regex;
use crate::catalog::Catalog;

const VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+$";

/// Validates whether a version string is a plain `major.minor.patch`
/// triple. No leading `v`, no pre-release or build metadata.
pub fn is_valid_version(version: &str) -> bool {
    Regex::new(VERSION_PATTERN)
        .map(|re| re.is_match(version))
        .unwrap_or(false)
}

/// Gates every lifecycle operation: the name must be one of the catalog's
/// enumerated binaries (exact, case-sensitive) and the version must match
/// the strict triple syntax. Checked in that order; the first failure
/// aborts the invocation.
pub fn validate(catalog: &Catalog, name: &str, version: &str) -> Result<()> {
    if !catalog.contains(name) {
        bail!("Invalid binary name '{}': not in the catalog (see `shelf help`)", name);
    }
    if !is_valid_version(version) {
        bail!(
            "Invalid version '{}': expected <major>.<minor>.<patch> (see `shelf help`)",
            version
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BinaryEntry;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn mock_catalog() -> Catalog {
        let mut binaries = BTreeMap::new();
        binaries.insert("just".to_string(), BinaryEntry::default());
        Catalog {
            parent_dir: PathBuf::from("/tools"),
            link_dir: PathBuf::from("/bin"),
            binaries,
        }
    }

    #[test]
    fn test_is_valid_version_valid() {
        assert!(is_valid_version("1.2.3"));
        assert!(is_valid_version("0.0.0"));
        assert!(is_valid_version("10.20.30"));
    }

    #[test]
    fn test_is_valid_version_invalid() {
        assert!(!is_valid_version("v1.2.3"));
        assert!(!is_valid_version("1.2"));
        assert!(!is_valid_version("1.2.3-rc1"));
        assert!(!is_valid_version("1.2.3.4"));
        assert!(!is_valid_version(""));
        assert!(!is_valid_version("not-a-version"));
    }

    #[test]
    fn test_validate_passes_for_catalog_name() {
        let catalog = mock_catalog();
        assert!(validate(&catalog, "just", "1.2.3").is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_name() {
        let catalog = mock_catalog();
        let err = validate(&catalog, "bogus", "1.2.3").unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_validate_is_case_sensitive() {
        let catalog = mock_catalog();
        assert!(validate(&catalog, "Just", "1.2.3").is_err());
    }

    #[test]
    fn test_validate_checks_name_before_version() {
        let catalog = mock_catalog();
        let err = validate(&catalog, "bogus", "not-a-version").unwrap_err();
        assert!(err.to_string().contains("binary name"));
    }
}
