//! Project generation: picks the template roots for a project type and
//! overlays them onto a fresh or existing directory.

use std::path::{Component, Path, PathBuf};

use clap::ValueEnum;
use log::debug;

use crate::bundle::TemplateSource;
use crate::constants::SHARED_TEMPLATE_ROOT;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::fs::{create_directory, directory_exists};
use crate::logger::Logger;
use crate::processor::{CollisionPolicy, Overlay};
use crate::renderer::TemplateRenderer;

/// Kinds of project the tool can scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectType {
    /// Web API service; also receives the Swagger UI assets.
    #[value(alias = "project")]
    Api,
    /// Command-line application.
    #[value(alias = "cli")]
    Cmd,
    /// Library module.
    Module,
}

impl ProjectType {
    /// Directory under the template directory holding this type's files.
    pub fn template_root(self) -> &'static str {
        match self {
            ProjectType::Api => "api",
            ProjectType::Cmd => "cmd",
            ProjectType::Module => "module",
        }
    }

    pub fn embeds_swagger(self) -> bool {
        self == ProjectType::Api
    }
}

/// Validates a project name and returns the directory it maps to.
pub fn project_destination<P: AsRef<Path>>(base: P, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(base.as_ref().join(name)),
        _ => Err(Error::InvalidArgument(format!("'{name}' is not a valid project name"))),
    }
}

/// Overlays template roots for a project type.
pub struct Generator<'a> {
    source: TemplateSource,
    renderer: &'a dyn TemplateRenderer,
    logger: &'a dyn Logger,
}

impl<'a> Generator<'a> {
    /// # Arguments
    /// * `source` - Template directory, or [`TemplateSource::Bundled`]
    /// * `renderer` - Renders each template file
    /// * `logger` - Receives progress and collision warnings
    pub fn new<S: Into<TemplateSource>>(
        source: S,
        renderer: &'a dyn TemplateRenderer,
        logger: &'a dyn Logger,
    ) -> Self {
        Self { source: source.into(), renderer, logger }
    }

    /// Names of the template roots for `kind`, in application order.
    pub fn template_roots(kind: ProjectType) -> [&'static str; 2] {
        [kind.template_root(), SHARED_TEMPLATE_ROOT]
    }

    /// Creates `destination` and materializes the project into it.
    ///
    /// # Errors
    /// * [`Error::DestinationExists`] if the directory is already there
    /// * [`Error::NotFound`] if a template root is missing; nothing is created
    pub fn create<P: AsRef<Path>>(&self, kind: ProjectType, destination: P, context: &Context) -> Result<()> {
        let destination = destination.as_ref();
        if destination.exists() {
            return Err(Error::DestinationExists { path: destination.to_path_buf() });
        }
        self.check_roots(kind)?;

        create_directory(destination, self.logger)?;
        self.overlay(kind, destination, context, CollisionPolicy::Refuse)
    }

    /// Materializes the project into an existing directory.
    pub fn init<P: AsRef<Path>>(
        &self,
        kind: ProjectType,
        destination: P,
        context: &Context,
        policy: CollisionPolicy,
    ) -> Result<()> {
        let destination = destination.as_ref();
        if !directory_exists(destination) {
            return Err(Error::NotFound { path: destination.to_path_buf() });
        }
        self.check_roots(kind)?;
        self.overlay(kind, destination, context, policy)
    }

    fn check_roots(&self, kind: ProjectType) -> Result<()> {
        for root in Self::template_roots(kind) {
            if !self.source.has_root(root) {
                return Err(Error::NotFound { path: self.source.display_path(root) });
            }
        }
        Ok(())
    }

    fn overlay(
        &self,
        kind: ProjectType,
        destination: &Path,
        context: &Context,
        policy: CollisionPolicy,
    ) -> Result<()> {
        let mut overlay =
            Overlay::new(destination, context, self.renderer, self.logger).with_policy(policy);
        for root in Self::template_roots(kind) {
            match &self.source {
                TemplateSource::Directory(dir) => overlay.apply_root(dir.join(root))?,
                TemplateSource::Bundled => overlay.apply_bundled(root)?,
            }
        }
        debug!("{} files written to {}", overlay.written().len(), destination.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_destination() {
        assert_eq!(project_destination("/work", "demo").unwrap(), PathBuf::from("/work/demo"));
        assert!(project_destination("/work", "").is_err());
        assert!(project_destination("/work", "../escape").is_err());
        assert!(project_destination("/work", "a/b").is_err());
        assert!(project_destination("/work", "/abs").is_err());
    }

    #[test]
    fn test_template_roots_order() {
        assert_eq!(Generator::template_roots(ProjectType::Module), ["module", "shared"]);
        assert_eq!(Generator::template_roots(ProjectType::Api), ["api", "shared"]);
        assert!(ProjectType::Api.embeds_swagger());
        assert!(!ProjectType::Cmd.embeds_swagger());
    }

    #[test]
    fn test_create_from_bundled_templates() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let renderer = crate::renderer::PlaceholderRenderer::new();
        let generator = Generator::new(TemplateSource::Bundled, &renderer, &crate::logger::NullLogger);
        let destination = temp_dir.path().join("tool");
        let context = Context::for_project("Ada", "ada@example.com", "tool", "0.1.0");

        generator.create(ProjectType::Cmd, &destination, &context).unwrap();

        assert!(destination.join("src/__main__.py").is_file());
        assert!(destination.join("README.md").is_file());
        assert!(destination.join("LICENSE").is_file());
    }
}
