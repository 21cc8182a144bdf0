//! Scratch directory owned by one pipeline run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    STAGING_CSS, STAGING_DOWNLOADS, STAGING_EXTRACT, STAGING_IMG, STAGING_JS, STAGING_MARKER,
    STAGING_ROOT, STAGING_STATIC, STAGING_SWAGGER, STAGING_TEMPLATES,
};
use crate::error::{Error, Result};
use crate::fs::{create_directories, create_directory, delete_directory, file_exists, write_file};
use crate::logger::Logger;

/// The `temp` tree under the base directory.
///
/// Dropping the guard removes the tree. [`Staging::close`] does the same but
/// reports failures, so the success path should end with it.
pub struct Staging<'a> {
    base: PathBuf,
    root: PathBuf,
    logger: &'a dyn Logger,
    released: bool,
}

impl<'a> Staging<'a> {
    /// Creates the staging layout.
    ///
    /// A tree left behind by a crashed run (recognised by its marker file) is
    /// removed first.
    ///
    /// # Errors
    /// * [`Error::StagingInUse`] if `<base>/temp` exists without the marker
    /// * [`Error::Io`] if the layout cannot be created
    pub fn acquire<P: AsRef<Path>>(base: P, logger: &'a dyn Logger) -> Result<Self> {
        let base = base.as_ref().to_path_buf();
        let root = base.join(STAGING_ROOT);

        if root.exists() {
            if !file_exists(base.join(STAGING_MARKER)) {
                return Err(Error::StagingInUse { path: root });
            }
            logger.warn(&format!("Removing stale staging directory '{}'", root.display()));
            delete_directory(&root, logger)?;
        }
        create_directory(&root, logger)?;

        let staging = Self { base, root, logger, released: false };
        write_file(staging.join(STAGING_MARKER), "")?;
        let layout: Vec<PathBuf> = [
            STAGING_DOWNLOADS,
            STAGING_EXTRACT,
            STAGING_SWAGGER,
            STAGING_STATIC,
            STAGING_JS,
            STAGING_CSS,
            STAGING_IMG,
            STAGING_TEMPLATES,
        ]
        .iter()
        .map(|relative| staging.join(relative))
        .collect();
        create_directories(layout.as_slice(), logger)?;

        Ok(staging)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves one of the `temp/...` layout constants.
    pub fn join<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.base.join(relative)
    }

    /// Removes the staging tree, surfacing any failure.
    pub fn close(mut self) -> Result<()> {
        self.released = true;
        delete_directory(&self.root, self.logger)
    }
}

impl Drop for Staging<'_> {
    fn drop(&mut self) {
        if self.released || !self.root.exists() {
            return;
        }
        log::debug!("Releasing staging directory {}", self.root.display());
        if let Err(e) = fs::remove_dir_all(&self.root) {
            self.logger.error(&format!(
                "Failed to remove staging directory '{}': {e}",
                self.root.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{ensure_directory, write_file};
    use crate::logger::{MemoryLogger, NullLogger};
    use tempfile::TempDir;

    #[test]
    fn test_layout_created_and_closed() {
        let temp_dir = TempDir::new().unwrap();
        let staging = Staging::acquire(temp_dir.path(), &NullLogger).unwrap();

        for relative in [STAGING_DOWNLOADS, STAGING_EXTRACT, STAGING_JS, STAGING_CSS, STAGING_IMG, STAGING_TEMPLATES] {
            assert!(staging.join(relative).is_dir(), "{relative} missing");
        }

        let root = staging.root().to_path_buf();
        staging.close().unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_drop_releases_on_early_exit() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(STAGING_ROOT);

        let failing = || -> Result<()> {
            let staging = Staging::acquire(temp_dir.path(), &NullLogger)?;
            write_file(staging.join(STAGING_JS).join("a.js"), "x")?;
            crate::fs::read_file(staging.join("temp/missing"))?;
            staging.close()
        };
        assert!(failing().is_err());
        assert!(!root.exists());
    }

    #[test]
    fn test_stale_tree_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let stale = temp_dir.path().join("temp/leftover");
        ensure_directory(&stale).unwrap();
        write_file(temp_dir.path().join(STAGING_MARKER), "").unwrap();

        let logger = MemoryLogger::new();
        let staging = Staging::acquire(temp_dir.path(), &logger).unwrap();
        assert!(!stale.exists());
        assert!(logger.infos().iter().any(|m| m.contains("stale staging directory")));
        staging.close().unwrap();
    }

    #[test]
    fn test_foreign_temp_directory_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let data = temp_dir.path().join("temp/notes.txt");
        ensure_directory(data.parent().unwrap()).unwrap();
        write_file(&data, "mine").unwrap();

        match Staging::acquire(temp_dir.path(), &NullLogger) {
            Err(Error::StagingInUse { path }) => assert_eq!(path, temp_dir.path().join(STAGING_ROOT)),
            Err(other) => panic!("Expected StagingInUse, got {other:?}"),
            Ok(_) => panic!("Expected StagingInUse"),
        }
        assert_eq!(crate::fs::read_file(&data).unwrap(), "mine");
    }
}
