use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use crate::paths::ShelfPaths;

/// The declarative catalog: which binaries can be installed, the command
/// lines that fetch them, and the two directories everything lives in.
///
/// The catalog is the only configuration source. It is loaded once at
/// startup; both directories are required and their absence is fatal.
#[derive(Debug)]
pub struct Catalog {
    /// Root for per-version artifact directories.
    pub parent_dir: PathBuf,
    /// Directory for the per-name link slots.
    pub link_dir: PathBuf,
    /// Installable binaries, keyed by name (exact, case-sensitive).
    pub binaries: BTreeMap<String, BinaryEntry>,
}

/// One installable binary: ordered command templates with a `{version}`
/// placeholder, run in the artifact directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BinaryEntry {
    /// Commands that must leave a file named after the binary in the
    /// current working directory.
    #[serde(default)]
    pub download: Vec<String>,
    /// Reserved checksum commands. Parsed and substituted like `download`,
    /// but never executed by this version.
    #[serde(default)]
    pub checksum: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    config: RawConfig,
    #[serde(default)]
    binaries: BTreeMap<String, BinaryEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    parent_dir: Option<PathBuf>,
    link_dir: Option<PathBuf>,
}

impl Catalog {
    /// Resolves the catalog location: an explicit `--catalog` path wins,
    /// then the `SHELF_CATALOG` environment variable, then
    /// `<platform config dir>/shelf/catalog.toml`.
    pub fn locate(flag: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = flag {
            return Ok(path);
        }
        if let Ok(path) = std::env::var("SHELF_CATALOG") {
            return Ok(PathBuf::from(path));
        }
        let proj_dirs = ProjectDirs::from("org", "shelf", "shelf")
            .ok_or_else(|| anyhow!("Could not determine the platform config directory"))?;
        Ok(proj_dirs.config_dir().join("catalog.toml"))
    }

    /// Loads and checks the catalog file.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or parsed, or if
    /// `config.parent_dir` / `config.link_dir` is missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Could not read catalog at {}", path.as_ref().display()))?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Catalog> {
        let raw: RawCatalog = toml::from_str(content)?;
        let Some(parent_dir) = raw.config.parent_dir else {
            bail!("Catalog is missing config.parent_dir");
        };
        let Some(link_dir) = raw.config.link_dir else {
            bail!("Catalog is missing config.link_dir");
        };
        Ok(Catalog {
            parent_dir,
            link_dir,
            binaries: raw.binaries,
        })
    }

    /// Whether `name` is one of the catalog's enumerated binaries.
    pub fn contains(&self, name: &str) -> bool {
        self.binaries.contains_key(name)
    }

    /// The enumerated binary names, in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.binaries.keys().map(String::as_str)
    }

    /// The download command lines for `name`, with every `{version}`
    /// placeholder substituted.
    pub fn download_commands(&self, name: &str, version: &str) -> Result<Vec<String>> {
        let entry = self.entry(name)?;
        Ok(substitute(&entry.download, version))
    }

    /// The checksum command lines for `name`, substituted like
    /// [`Catalog::download_commands`]. Nothing runs these yet.
    pub fn checksum_commands(&self, name: &str, version: &str) -> Result<Vec<String>> {
        let entry = self.entry(name)?;
        Ok(substitute(&entry.checksum, version))
    }

    /// The directory pair every operation works against.
    pub fn shelf_paths(&self) -> ShelfPaths {
        ShelfPaths::new(&self.parent_dir, &self.link_dir)
    }

    fn entry(&self, name: &str) -> Result<&BinaryEntry> {
        self.binaries
            .get(name)
            .ok_or_else(|| anyhow!("'{}' is not in the catalog", name))
    }
}

fn substitute(commands: &[String], version: &str) -> Vec<String> {
    commands
        .iter()
        .map(|line| line.replace("{version}", version))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [config]
        parent_dir = "/tools"
        link_dir = "/bin"

        [binaries.just]
        download = ["curl -fsSLo just https://example.com/just/{version}/just"]
        checksum = ["sha256sum -c just-{version}.sha256"]

        [binaries.rg]
        download = ["fetch rg {version}"]
    "#;

    #[test]
    fn test_parse_sample() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.parent_dir, PathBuf::from("/tools"));
        assert_eq!(catalog.link_dir, PathBuf::from("/bin"));
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["just", "rg"]);
        assert!(catalog.contains("just"));
        assert!(!catalog.contains("Just"));
    }

    #[test]
    fn test_missing_parent_dir_is_fatal() {
        let err = Catalog::parse("[config]\nlink_dir = \"/bin\"\n").unwrap_err();
        assert!(err.to_string().contains("parent_dir"));
    }

    #[test]
    fn test_missing_link_dir_is_fatal() {
        let err = Catalog::parse("[config]\nparent_dir = \"/tools\"\n").unwrap_err();
        assert!(err.to_string().contains("link_dir"));
    }

    #[test]
    fn test_version_placeholder_substitution() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let commands = catalog.download_commands("just", "1.42.0").unwrap();
        assert_eq!(
            commands,
            vec!["curl -fsSLo just https://example.com/just/1.42.0/just"]
        );
        let checksum = catalog.checksum_commands("just", "1.42.0").unwrap();
        assert_eq!(checksum, vec!["sha256sum -c just-1.42.0.sha256"]);
    }

    #[test]
    fn test_unknown_name_errors() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert!(catalog.download_commands("bogus", "1.0.0").is_err());
    }

    #[test]
    fn test_checksum_defaults_to_empty() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert!(catalog.checksum_commands("rg", "1.0.0").unwrap().is_empty());
    }
}
