//! Configuration handling for scaffold.
//! Loads optional defaults from `scaffold.json`, `scaffold.yml` or
//! `scaffold.yaml` in the base directory.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::bundle::TemplateSource;
use crate::constants::{CONFIG_FILES, DEFAULT_PROJECT_VERSION, DEFAULT_SWAGGER_TARGET};
use crate::error::{Error, Result};
use crate::fs::read_file;

/// Defaults applied when the command line leaves a value out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub author: String,
    pub author_email: String,
    pub version: String,
    /// Template directory replacing the bundled templates.
    pub templates_dir: Option<PathBuf>,
    pub swagger_target: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            author: String::new(),
            author_email: String::new(),
            version: DEFAULT_PROJECT_VERSION.to_string(),
            templates_dir: None,
            swagger_target: PathBuf::from(DEFAULT_SWAGGER_TARGET),
        }
    }
}

impl Settings {
    /// Picks the template source: `cli_dir` first, then the `templates_dir`
    /// setting, then the templates bundled with the binary. Directories are
    /// resolved against `base` unless already absolute.
    pub fn template_source(&self, base: &Path, cli_dir: Option<&Path>) -> TemplateSource {
        match cli_dir.or(self.templates_dir.as_deref()) {
            Some(dir) => TemplateSource::Directory(base.join(dir)),
            None => TemplateSource::Bundled,
        }
    }
}

/// Returns the first existing configuration file in `base_dir`, if any.
pub fn find_config<P: AsRef<Path>>(base_dir: P, config_files: &[&str]) -> Option<PathBuf> {
    config_files.iter().map(|file| base_dir.as_ref().join(file)).find(|path| path.is_file())
}

/// Parses settings, trying JSON first and then YAML.
pub fn parse_settings(content: &str) -> Result<Settings> {
    match serde_json::from_str(content) {
        Ok(settings) => Ok(settings),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid configuration format: {e}"))),
    }
}

/// Loads settings from `base_dir`, falling back to defaults when no
/// configuration file is present.
pub fn load_settings<P: AsRef<Path>>(base_dir: P) -> Result<Settings> {
    match find_config(&base_dir, &CONFIG_FILES) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            let content = read_file(&path)?;
            if content.trim().is_empty() {
                return Ok(Settings::default());
            }
            parse_settings(&content)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
        }
        None => {
            debug!("No configuration file found (tried: {})", CONFIG_FILES.join(", "));
            Ok(Settings::default())
        }
    }
}
