//! Templates shipped inside the binary.
//!
//! The `templates/` directory of this crate is embedded at compile time, so
//! a freshly installed `scaffold` can generate projects from any working
//! directory. A template directory on disk (`--templates` or the
//! `templates_dir` setting) replaces the bundled set as a whole.

use std::io;
use std::path::{Path, PathBuf};

use rust_embed::RustEmbed;

use crate::error::{Error, Result};
use crate::fs::{directory_exists, read_file};

/// Container for all templates embedded at compile time.
#[derive(RustEmbed)]
#[folder = "templates/"]
struct BundledTemplates;

/// Label used in paths reported for bundled templates.
const BUNDLED_PREFIX: &str = "<bundled>";

/// Where template roots are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// A directory holding one sub-directory per template root.
    Directory(PathBuf),
    /// The set compiled into the binary.
    Bundled,
}

impl TemplateSource {
    /// Whether the named root (`module`, `shared`, ...) exists in this source.
    pub fn has_root(&self, root: &str) -> bool {
        match self {
            TemplateSource::Directory(dir) => directory_exists(dir.join(root)),
            TemplateSource::Bundled => !bundled_root_files(root).is_empty(),
        }
    }

    /// Path naming `relative` inside this source, for messages and errors.
    pub fn display_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        match self {
            TemplateSource::Directory(dir) => dir.join(relative),
            TemplateSource::Bundled => Path::new(BUNDLED_PREFIX).join(relative),
        }
    }

    /// One file of this source, addressed relative to the source root.
    pub fn file(&self, relative: &str) -> TemplateFile {
        match self {
            TemplateSource::Directory(dir) => TemplateFile::Path(dir.join(relative)),
            TemplateSource::Bundled => TemplateFile::Bundled(relative.to_string()),
        }
    }
}

impl From<PathBuf> for TemplateSource {
    fn from(dir: PathBuf) -> Self {
        TemplateSource::Directory(dir)
    }
}

impl From<&Path> for TemplateSource {
    fn from(dir: &Path) -> Self {
        TemplateSource::Directory(dir.to_path_buf())
    }
}

/// A single template, on disk or bundled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateFile {
    Path(PathBuf),
    /// Path relative to the bundled `templates/` directory.
    Bundled(String),
}

impl TemplateFile {
    /// Path used when reporting on this template.
    pub fn display_path(&self) -> PathBuf {
        match self {
            TemplateFile::Path(path) => path.clone(),
            TemplateFile::Bundled(relative) => TemplateSource::Bundled.display_path(relative),
        }
    }

    /// Reads the template text.
    ///
    /// # Errors
    /// * [`Error::NotFound`] if the template does not exist
    /// * [`Error::Io`] if it cannot be read or is not UTF-8
    pub fn read(&self) -> Result<String> {
        match self {
            TemplateFile::Path(path) => read_file(path),
            TemplateFile::Bundled(relative) => read_bundled(relative),
        }
    }
}

/// Files of one bundled root as paths relative to that root, sorted.
pub fn bundled_root_files(root: &str) -> Vec<PathBuf> {
    let prefix = format!("{}/", root.trim_end_matches('/'));
    let mut files: Vec<PathBuf> = BundledTemplates::iter()
        .filter_map(|path| path.strip_prefix(prefix.as_str()).map(PathBuf::from))
        .collect();
    files.sort();
    files
}

/// Content of one bundled file, addressed relative to `templates/`.
pub fn read_bundled(relative: &str) -> Result<String> {
    let display = TemplateSource::Bundled.display_path(relative);
    let file = BundledTemplates::get(relative).ok_or_else(|| Error::NotFound { path: display.clone() })?;
    std::str::from_utf8(&file.data)
        .map(str::to_string)
        .map_err(|e| Error::io(display, io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{OPENAPI_TEMPLATE, SHARED_TEMPLATE_ROOT};

    #[test]
    fn test_bundled_roots_are_present() {
        for root in ["api", "cmd", "module", SHARED_TEMPLATE_ROOT] {
            assert!(TemplateSource::Bundled.has_root(root), "missing bundled root {root}");
        }
        assert!(!TemplateSource::Bundled.has_root("plugin"));
        // A prefix of a root name is not a root.
        assert!(!TemplateSource::Bundled.has_root("mod"));
    }

    #[test]
    fn test_bundled_root_files_are_relative_and_sorted() {
        let files = bundled_root_files("module");
        assert!(files.contains(&PathBuf::from("pyproject.toml.jinja2")));
        assert!(files.contains(&PathBuf::from("src/__init__.py.jinja2")));
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
    }

    #[test]
    fn test_read_bundled() {
        let text = TemplateSource::Bundled.file(OPENAPI_TEMPLATE).read().unwrap();
        assert!(text.contains("{{ project_name }}"));

        match read_bundled("module/missing.txt") {
            Err(Error::NotFound { path }) => assert_eq!(path, PathBuf::from("<bundled>/module/missing.txt")),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_source_paths() {
        let source = TemplateSource::from(PathBuf::from("/srv/tpl"));
        assert_eq!(source.display_path("module"), PathBuf::from("/srv/tpl/module"));
        assert_eq!(
            source.file(OPENAPI_TEMPLATE),
            TemplateFile::Path(PathBuf::from("/srv/tpl/swagger/openapi.yaml.jinja2"))
        );
    }
}
