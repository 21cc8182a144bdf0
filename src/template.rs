//! Mapping template paths to destination paths and rendering single files.

use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::constants::TEMPLATE_SUFFIX;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::fs::{read_file, write_file};
use crate::renderer::{TemplateRenderer, UndefinedKey};

/// Renders files from one template root into one destination root.
pub struct TemplateExecutor<'a> {
    root: PathBuf,
    destination: PathBuf,
    context: &'a Context,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> TemplateExecutor<'a> {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        root: P,
        destination: Q,
        context: &'a Context,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self { root: root.into(), destination: destination.into(), context, renderer }
    }

    /// Maps a file under the template root onto the destination root.
    ///
    /// The root prefix is removed, then one trailing template suffix on the
    /// final segment. Earlier segments are kept as they are. The result only
    /// depends on the arguments and the executor's roots.
    pub fn generate_output_path<P: AsRef<Path>>(&self, input_path: P) -> PathBuf {
        let output = self.directory_output_path(input_path);
        match output.file_name().and_then(|name| name.to_str()) {
            Some(name) => match name.strip_suffix(TEMPLATE_SUFFIX) {
                Some(stripped) if !stripped.is_empty() => output.with_file_name(stripped),
                _ => output,
            },
            None => output,
        }
    }

    /// Maps a directory under the template root onto the destination root.
    /// Directory names are never transformed.
    pub fn directory_output_path<P: AsRef<Path>>(&self, input_path: P) -> PathBuf {
        let input_path = input_path.as_ref();
        let relative = input_path.strip_prefix(&self.root).unwrap_or(input_path);
        let relative: PathBuf = relative
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        self.destination.join(relative)
    }

    /// Renders `template_path` into `output_path`, or into the generated
    /// output path when none is given. The parent directory must exist.
    pub fn apply<P: AsRef<Path>>(&self, template_path: P, output_path: Option<&Path>) -> Result<PathBuf> {
        let template_path = template_path.as_ref();
        let output_path = match output_path {
            Some(path) => path.to_path_buf(),
            None => self.generate_output_path(template_path),
        };
        debug!("Applying template '{}' -> '{}'", template_path.display(), output_path.display());

        let content = read_file(template_path)?;
        self.render_to(template_path, &content, &output_path)?;

        Ok(output_path)
    }

    /// Renders template text that was already loaded. `template` only names
    /// the source in errors.
    pub fn render_to(&self, template: &Path, content: &str, output_path: &Path) -> Result<()> {
        let rendered = self.renderer.render(content, self.context).map_err(|UndefinedKey(key)| {
            Error::TemplateRender { template: template.to_path_buf(), key }
        })?;
        write_file(output_path, &rendered)
    }
}
