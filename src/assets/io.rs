//! Asset Path Resolution and File IO
//!
//! Loads are synchronous blocking reads on whichever thread calls fetch;
//! the resource core never suspends.

use std::path::{Path, PathBuf};

use crate::errors::{ResourceError, Result};

/// Turns logical asset names into absolute paths under an asset root.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    /// Creates a resolver rooted at `root`. A file path roots the resolver
    /// at the file's parent directory, so a resolver can be built straight
    /// from a project file location.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let path = root.as_ref();
        let root = if path.is_file() {
            path.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            path.to_path_buf()
        };
        Self { root }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a logical path against the root. Absolute inputs pass
    /// through unchanged.
    #[must_use]
    pub fn resolve(&self, uri: impl AsRef<Path>) -> PathBuf {
        let uri = uri.as_ref();
        if uri.is_absolute() {
            uri.to_path_buf()
        } else {
            self.root.join(uri)
        }
    }

    #[must_use]
    pub fn exists(&self, uri: impl AsRef<Path>) -> bool {
        self.resolve(uri).exists()
    }

    /// Reads an asset into memory. Missing files surface as
    /// [`ResourceError::NotFound`] so callers can distinguish bad paths
    /// from IO failures.
    pub fn read_bytes(&self, uri: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = self.resolve(uri);
        if !path.exists() {
            return Err(ResourceError::NotFound(path.display().to_string()));
        }
        Ok(std::fs::read(&path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_resolve_under_root() {
        let resolver = AssetResolver::new("/game/assets");
        assert_eq!(
            resolver.resolve("img/tilesets/outside.png"),
            PathBuf::from("/game/assets/img/tilesets/outside.png")
        );
    }

    #[test]
    fn absolute_paths_pass_through() {
        let resolver = AssetResolver::new("/game/assets");
        assert_eq!(
            resolver.resolve("/elsewhere/x.png"),
            PathBuf::from("/elsewhere/x.png")
        );
    }

    #[test]
    fn missing_file_reads_as_not_found() {
        let resolver = AssetResolver::new(std::env::temp_dir());
        let err = resolver.read_bytes("relic-does-not-exist.bin").unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }

    #[test]
    fn directory_root_is_kept_as_is() {
        let dir = std::env::temp_dir();
        let resolver = AssetResolver::new(&dir);
        assert_eq!(resolver.root(), dir.as_path());
    }

    #[test]
    fn file_root_uses_parent_directory() {
        let dir = std::env::temp_dir().join(format!("relic-io-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("project.json");
        std::fs::write(&file, b"{}").unwrap();

        let resolver = AssetResolver::new(&file);
        assert_eq!(resolver.root(), dir.as_path());

        std::fs::remove_dir_all(&dir).ok();
    }
}
