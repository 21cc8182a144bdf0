//! Overlay of template roots onto a destination tree.
//!
//! Walks each root top-down, mirroring directories and rendering every file
//! through a [`TemplateExecutor`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::bundle::{bundled_root_files, read_bundled, TemplateSource};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::fs::{ensure_directory, walk_error};
use crate::logger::Logger;
use crate::renderer::TemplateRenderer;
use crate::template::TemplateExecutor;

/// What to do when a rendered file would replace one that was already on
/// disk before the overlay started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Fail with [`Error::FileConflict`].
    #[default]
    Refuse,
    /// Replace the file and log a warning.
    Overwrite,
}

/// Applies template roots, in order, onto one destination.
///
/// Files written by an earlier root of the same overlay are replaced by
/// later roots (last write wins) and the replacement is reported as a
/// warning.
pub struct Overlay<'a> {
    destination: PathBuf,
    context: &'a Context,
    renderer: &'a dyn TemplateRenderer,
    logger: &'a dyn Logger,
    policy: CollisionPolicy,
    written: HashSet<PathBuf>,
}

impl<'a> Overlay<'a> {
    pub fn new<P: Into<PathBuf>>(
        destination: P,
        context: &'a Context,
        renderer: &'a dyn TemplateRenderer,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            destination: destination.into(),
            context,
            renderer,
            logger,
            policy: CollisionPolicy::default(),
            written: HashSet::new(),
        }
    }

    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Every file produced so far, across all applied roots.
    pub fn written(&self) -> &HashSet<PathBuf> {
        &self.written
    }

    /// Materializes one template root. Stops at the first failure.
    ///
    /// Directories are mirrored as they are named; files are rendered to
    /// the executor's output path, with one `.jinja2` marker stripped.
    ///
    /// # Arguments
    /// * `root` - Template root directory on disk
    ///
    /// # Errors
    /// * [`Error::NotFound`] if `root` is not a directory
    /// * [`Error::FileConflict`] per the collision policy
    /// * [`Error::TemplateRender`] for an unresolved placeholder
    /// * [`Error::Io`] if a directory or file cannot be written
    pub fn apply_root<P: AsRef<Path>>(&mut self, root: P) -> Result<()> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::NotFound { path: root.to_path_buf() });
        }
        self.logger.info(&format!("Applying template root '{}' ...", root.display()));

        let executor = TemplateExecutor::new(root, &self.destination, self.context, self.renderer);

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(root, e))?;
            let path = entry.path();

            if entry.file_type().is_dir() {
                let target = executor.directory_output_path(path);
                debug!("Creating directory: {}", target.display());
                ensure_directory(&target)?;
                continue;
            }

            let target = executor.generate_output_path(path);
            self.check_collision(&target)?;
            executor.apply(path, Some(&target))?;
            self.record(target);
        }
        Ok(())
    }

    /// Materializes one root of the bundled template set.
    ///
    /// # Arguments
    /// * `root` - Root name inside the bundle, e.g. `module` or `shared`
    ///
    /// # Errors
    /// * [`Error::NotFound`] if the bundle has no such root
    /// * [`Error::FileConflict`] per the collision policy
    /// * [`Error::TemplateRender`] for an unresolved placeholder
    pub fn apply_bundled(&mut self, root: &str) -> Result<()> {
        let files = bundled_root_files(root);
        let root_path = TemplateSource::Bundled.display_path(root);
        if files.is_empty() {
            return Err(Error::NotFound { path: root_path });
        }
        self.logger.info(&format!("Applying template root '{}' ...", root_path.display()));

        let executor = TemplateExecutor::new(&root_path, &self.destination, self.context, self.renderer);
        ensure_directory(&self.destination)?;

        for relative in files {
            let mut parents: Vec<&Path> =
                relative.ancestors().skip(1).filter(|dir| !dir.as_os_str().is_empty()).collect();
            parents.reverse();
            for dir in parents {
                let target = executor.directory_output_path(root_path.join(dir));
                debug!("Creating directory: {}", target.display());
                ensure_directory(&target)?;
            }

            let source = root_path.join(&relative);
            let target = executor.generate_output_path(&source);
            self.check_collision(&target)?;
            let content = read_bundled(&format!("{root}/{}", bundle_key(&relative)))?;
            executor.render_to(&source, &content, &target)?;
            self.record(target);
        }
        Ok(())
    }

    fn record(&mut self, target: PathBuf) {
        self.logger.info(&format!("Rendered '{}'", target.display()));
        self.written.insert(target);
    }

    fn check_collision(&self, target: &Path) -> Result<()> {
        if !target.exists() {
            return Ok(());
        }
        if self.written.contains(target) {
            self.logger.warn(&format!("'{}' replaced by a later template root", target.display()));
            return Ok(());
        }
        match self.policy {
            CollisionPolicy::Refuse => Err(Error::FileConflict { path: target.to_path_buf() }),
            CollisionPolicy::Overwrite => {
                self.logger.warn(&format!("Overwriting existing file '{}'", target.display()));
                Ok(())
            }
        }
    }
}

/// Bundle keys always use `/`, whatever the host separator.
fn bundle_key(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
