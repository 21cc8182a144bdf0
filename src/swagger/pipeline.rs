//! Download, repackage and embed a Swagger UI release into an API project.

use std::path::{Path, PathBuf};
use std::time::Instant;

use log::debug;
use walkdir::WalkDir;

use crate::bundle::TemplateFile;
use crate::constants::{
    OPENAPI_JSON, OPENAPI_YAML, STAGING_CSS, STAGING_DOWNLOADS, STAGING_EXTRACT, STAGING_IMG,
    STAGING_JS, STAGING_TEMPLATES, SWAGGER_DEMO_URL_LITERAL, SWAGGER_ENTRY, SWAGGER_INDEX,
    SWAGGER_INITIALIZER, SWAGGER_LOCAL_URL_LITERAL,
};
use crate::context::Context;
use crate::error::{Error, Result};
use crate::fs::{
    convert_yaml_to_json, copy_file, copy_tree, delete_directory, directory_exists,
    ensure_directory, file_exists, replace_in_file, unzip_file, walk_error,
};
use crate::logger::Logger;
use crate::paths::get_extension;
use crate::renderer::TemplateRenderer;
use crate::template::TemplateExecutor;

use super::html::inject_templates;
use super::release::{Release, ReleaseSource};
use super::staging::Staging;

/// Inputs for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project directory receiving `static/` and `templates/`.
    pub target_dir: PathBuf,
    /// Template rendered into `static/openapi.yaml`.
    pub api_template: TemplateFile,
    pub context: Context,
}

/// Runs the repackaging pipeline relative to an explicit base directory.
pub struct SwaggerBuilder<'a> {
    base: PathBuf,
    source: &'a dyn ReleaseSource,
    renderer: &'a dyn TemplateRenderer,
    logger: &'a dyn Logger,
}

impl<'a> SwaggerBuilder<'a> {
    pub fn new<P: Into<PathBuf>>(
        base: P,
        source: &'a dyn ReleaseSource,
        renderer: &'a dyn TemplateRenderer,
        logger: &'a dyn Logger,
    ) -> Self {
        Self { base: base.into(), source, renderer, logger }
    }

    /// Resolves the latest release without touching the filesystem.
    ///
    /// # Errors
    /// * `Error::UpstreamFetch` if the release page cannot be read or parsed
    pub fn latest_release(&self) -> Result<Release> {
        let tag = self.source.latest_tag()?;
        Release::new(&tag, self.base.join(STAGING_DOWNLOADS))
    }

    /// Executes every step in order. The staging tree is gone when this
    /// returns, whatever the outcome.
    ///
    /// # Arguments
    /// * `options` - Target project directory, API template and context
    ///
    /// # Returns
    /// * `Result<Release>` - The release that was embedded
    ///
    /// # Errors
    /// * `Error::StagingInUse` if `<base>/temp` belongs to someone else
    /// * `Error::UpstreamFetch` if the release cannot be resolved or fetched
    /// * `Error::NotFound` if the archive, its `dist` folder, the entry page
    ///   or the initializer is missing
    /// * `Error::Archive`, `Error::TemplateRender`, `Error::Conversion` or
    ///   `Error::Io` from the step that failed
    pub fn build(&self, options: &BuildOptions) -> Result<Release> {
        let release = self.latest_release()?;
        self.logger.info(&format!("Latest release: {}", release.tag));
        self.logger.info(&format!("Archive URL: {}", release.archive_url));

        let staging = Staging::acquire(&self.base, self.logger)?;

        self.download_and_extract(&staging, &release)?;

        let dist = staging.join(STAGING_EXTRACT).join(release.extracted_dir_name()).join("dist");
        self.copy_dist_files(&staging, &dist)?;

        let templates = staging.join(STAGING_TEMPLATES);
        self.logger.info(&format!("Renaming the index file to {SWAGGER_ENTRY} ..."));
        rename(templates.join(SWAGGER_INDEX), templates.join(SWAGGER_ENTRY))?;
        inject_templates(templates.join(SWAGGER_ENTRY))?;

        let static_dir = options.target_dir.join("static");
        self.generate_api_document(options, &static_dir)?;
        self.patch_initializer(&staging)?;

        delete_directory(staging.join(STAGING_EXTRACT), self.logger)?;

        self.ensure_target_directories(&options.target_dir)?;
        self.copy_static_files(&staging, &static_dir)?;
        self.copy_templates(&staging, &options.target_dir.join("templates"))?;

        staging.close()?;
        self.logger.info(&format!(
            "Swagger UI {} embedded into '{}'",
            release.version,
            options.target_dir.display()
        ));
        Ok(release)
    }

    fn download_and_extract(&self, staging: &Staging, release: &Release) -> Result<()> {
        self.logger.info(&format!("Downloading the archive '{}' ...", release.archive_url));
        let started = Instant::now();
        self.source.download(release)?;
        let elapsed = started.elapsed().as_secs_f64();

        if !file_exists(&release.archive_file) {
            self.logger.error(&format!(
                "Failed to download the archive file: '{}'!",
                release.archive_file.display()
            ));
            return Err(Error::NotFound { path: release.archive_file.clone() });
        }
        self.logger.info(&format!(
            "Successfully downloaded the archive to '{}' in {elapsed:.2} seconds.",
            release.archive_file.display()
        ));

        unzip_file(&release.archive_file, staging.join(STAGING_EXTRACT))?;
        delete_directory(staging.join(STAGING_DOWNLOADS), self.logger)
    }

    /// Routes every file of the distribution into the staged folder for its
    /// extension.
    fn copy_dist_files(&self, staging: &Staging, dist: &Path) -> Result<()> {
        if !directory_exists(dist) {
            return Err(Error::NotFound { path: dist.to_path_buf() });
        }
        self.logger.info("Copying dist files ...");

        for entry in WalkDir::new(dist).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(dist, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let source = entry.path();
            let folder = match get_extension(source).as_deref() {
                Some("js") => STAGING_JS,
                Some("css") => STAGING_CSS,
                Some("png") => STAGING_IMG,
                _ => STAGING_TEMPLATES,
            };
            let destination = staging.join(folder).join(entry.file_name());
            self.logger.info(&format!(
                "Copying '{}' to '{}'",
                source.display(),
                destination.display()
            ));
            copy_file(source, &destination)?;
        }

        self.logger.info("Done copying dist files");
        Ok(())
    }

    /// Renders the API description and its JSON twin into `static_dir`.
    fn generate_api_document(&self, options: &BuildOptions, static_dir: &Path) -> Result<()> {
        ensure_directory(static_dir)?;
        let yaml = static_dir.join(OPENAPI_YAML);
        let content = options.api_template.read()?;
        let executor = TemplateExecutor::new("", "", &options.context, self.renderer);
        executor.render_to(&options.api_template.display_path(), &content, &yaml)?;
        convert_yaml_to_json(&yaml, static_dir.join(OPENAPI_JSON), self.logger)
    }

    /// Points the initializer at the generated document instead of the
    /// public demo.
    fn patch_initializer(&self, staging: &Staging) -> Result<()> {
        let initializer = staging.join(STAGING_JS).join(SWAGGER_INITIALIZER);
        if !file_exists(&initializer) {
            return Err(Error::NotFound { path: initializer });
        }
        let replaced =
            replace_in_file(&initializer, SWAGGER_DEMO_URL_LITERAL, SWAGGER_LOCAL_URL_LITERAL)?;
        if replaced == 0 {
            self.logger.warn(&format!(
                "{SWAGGER_DEMO_URL_LITERAL} not found in '{}'",
                initializer.display()
            ));
        }
        debug!("Patched {replaced} occurrence(s) in {}", initializer.display());
        Ok(())
    }

    fn ensure_target_directories(&self, target_dir: &Path) -> Result<()> {
        let static_dir = target_dir.join("static");
        ensure_directory(&static_dir)?;
        ensure_directory(target_dir.join("templates"))?;

        for folder in ["js", "css", "img"] {
            let existing = static_dir.join(folder);
            if directory_exists(&existing) {
                delete_directory(&existing, self.logger)?;
            }
        }
        Ok(())
    }

    fn copy_static_files(&self, staging: &Staging, static_dir: &Path) -> Result<()> {
        self.logger.info("Copying static files");
        copy_tree(staging.join(STAGING_JS), static_dir.join("js"))?;
        copy_tree(staging.join(STAGING_CSS), static_dir.join("css"))?;
        copy_tree(staging.join(STAGING_IMG), static_dir.join("img"))?;
        self.logger.info("Done copying static files");
        Ok(())
    }

    fn copy_templates(&self, staging: &Staging, templates_dir: &Path) -> Result<()> {
        self.logger.info("Copying templates");
        let staged = staging.join(STAGING_TEMPLATES);
        for entry in WalkDir::new(&staged).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(&staged, e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let destination = templates_dir.join(entry.file_name());
            self.logger.info(&format!(
                "Copying '{}' to '{}'",
                entry.path().display(),
                destination.display()
            ));
            copy_file(entry.path(), &destination)?;
        }
        self.logger.info("Done copying templates");
        Ok(())
    }
}

fn rename(from: PathBuf, to: PathBuf) -> Result<()> {
    if !file_exists(&from) {
        return Err(Error::NotFound { path: from });
    }
    std::fs::rename(&from, &to).map_err(|e| Error::io(&from, e))
}
