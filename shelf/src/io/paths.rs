//! Canonical file locations under the data directory.

use std::path::{Path, PathBuf};

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "shelf.toml";

#[derive(Debug, Clone)]
pub struct ShelfPaths {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
}

impl ShelfPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            config_path: data_dir.join(CONFIG_FILE),
            data_dir,
        }
    }

    /// Resolve a configured file name against the data directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, file: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_and_keeps_absolute() {
        let paths = ShelfPaths::new("/srv/library");
        assert_eq!(paths.config_path, PathBuf::from("/srv/library/shelf.toml"));
        assert_eq!(
            paths.resolve("library.json"),
            PathBuf::from("/srv/library/library.json")
        );
        assert_eq!(paths.resolve("/tmp/out.txt"), PathBuf::from("/tmp/out.txt"));
    }
}
