//! Filesystem primitives.
//!
//! Each helper wraps a single operation and reports failures with the path
//! involved. None of them resolve paths against the current directory;
//! callers pass fully joined paths.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::{Error, Result};
use crate::logger::Logger;

pub fn directory_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_dir()
}

pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// Creates a single directory. Fails if it already exists or its parent is
/// missing.
///
/// # Arguments
/// * `path` - Directory to create
/// * `logger` - Receives the before and after progress messages
///
/// # Errors
/// * `Error::Io` carrying `path` if the directory cannot be created
pub fn create_directory<P: AsRef<Path>>(path: P, logger: &dyn Logger) -> Result<()> {
    let path = path.as_ref();
    logger.info(&format!("Creating directory '{}' ...", path.display()));
    fs::create_dir(path).map_err(|e| Error::io(path, e))?;
    logger.info(&format!("Successfully created directory '{}'.", path.display()));
    Ok(())
}

/// Creates each directory in order with [`create_directory`].
pub fn create_directories<P: AsRef<Path>>(paths: &[P], logger: &dyn Logger) -> Result<()> {
    for path in paths {
        create_directory(path, logger)?;
    }
    Ok(())
}

/// Creates a directory and any missing parents. Existing directories are
/// left alone.
pub fn ensure_directory<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Recursively deletes a directory.
///
/// # Errors
/// * `Error::NotFound` if `path` does not exist
/// * `Error::Io` for any other removal failure
pub fn delete_directory<P: AsRef<Path>>(path: P, logger: &dyn Logger) -> Result<()> {
    let path = path.as_ref();
    logger.info(&format!("Recursively deleting directory '{}' ...", path.display()));
    fs::remove_dir_all(path).map_err(|e| not_found_or_io(path, e))?;
    logger.info(&format!("Successfully deleted directory '{}'.", path.display()));
    Ok(())
}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| not_found_or_io(path, e))
}

/// Writes `content` to `path`, replacing any previous content. The parent
/// directory must already exist.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing file: {}", path.display());
    fs::write(path, content).map_err(|e| Error::io(path, e))
}

/// Replaces every occurrence of `search` in the file.
///
/// # Arguments
/// * `path` - File edited in place
/// * `search` - Literal text to look for
/// * `replace` - Replacement text
///
/// # Returns
/// * `Result<usize>` - Number of replacements; the file is not rewritten
///   when this is zero
pub fn replace_in_file<P: AsRef<Path>>(path: P, search: &str, replace: &str) -> Result<usize> {
    let path = path.as_ref();
    let data = read_file(path)?;
    let count = data.matches(search).count();
    if count > 0 {
        write_file(path, &data.replace(search, replace))?;
    }
    Ok(count)
}

pub fn copy_file<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> Result<()> {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    debug!("Copying file: {} -> {}", source.display(), dest.display());
    if !source.is_file() {
        return Err(Error::NotFound { path: source.to_path_buf() });
    }
    fs::copy(source, dest).map(|_| ()).map_err(|e| Error::io(dest, e))
}

/// Copies the tree rooted at `source` to `dest`, which must not exist yet.
///
/// # Errors
/// * `Error::NotFound` if `source` is not a directory
/// * `Error::Io` if `dest` already exists or a copy fails
pub fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> Result<()> {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    if !source.is_dir() {
        return Err(Error::NotFound { path: source.to_path_buf() });
    }

    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry.map_err(|e| walk_error(source, e))?;
        let relative = entry.path().strip_prefix(source).map_err(|_| {
            Error::InvalidArgument(format!("'{}' is outside '{}'", entry.path().display(), source.display()))
        })?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir(&target).map_err(|e| Error::io(&target, e))?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Extracts every entry of a zip archive under `out`.
///
/// # Errors
/// * `Error::NotFound` if the archive is missing
/// * `Error::Archive` if it is not a valid zip or an entry cannot be written
pub fn unzip_file<P: AsRef<Path>, Q: AsRef<Path>>(archive: P, out: Q) -> Result<()> {
    let (archive, out) = (archive.as_ref(), out.as_ref());
    let file = File::open(archive).map_err(|e| not_found_or_io(archive, e))?;
    let mut zip = ZipArchive::new(file)
        .map_err(|source| Error::Archive { path: archive.to_path_buf(), source })?;
    debug!("Extracting {} entries from {}", zip.len(), archive.display());
    zip.extract(out).map_err(|source| Error::Archive { path: archive.to_path_buf(), source })
}

/// Downloads `url` into `dest`.
///
/// # Arguments
/// * `client` - Shared blocking client carrying timeout and user agent
/// * `url` - Resource to fetch
/// * `dest` - File created or truncated with the response body
///
/// # Returns
/// * `Result<u64>` - Number of bytes written
///
/// # Errors
/// * `Error::UpstreamFetch` on transport failures or a non-success status
/// * `Error::Io` if `dest` cannot be created
pub fn download_file<P: AsRef<Path>>(
    client: &reqwest::blocking::Client,
    url: &str,
    dest: P,
) -> Result<u64> {
    let dest = dest.as_ref();
    let mut response = client
        .get(url)
        .send()
        .map_err(|e| Error::UpstreamFetch(format!("GET {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(Error::UpstreamFetch(format!("GET {url}: HTTP {}", response.status())));
    }

    let mut file = File::create(dest).map_err(|e| Error::io(dest, e))?;
    response
        .copy_to(&mut file)
        .map_err(|e| Error::UpstreamFetch(format!("reading body of {url}: {e}")))
}

/// Converts a YAML document into pretty-printed JSON (4-space indent).
///
/// Merge keys (`<<`) are resolved before conversion; mapping order is kept.
///
/// # Errors
/// * `Error::NotFound` if `yaml_path` is missing
/// * `Error::Conversion` if the YAML is invalid or has no JSON equivalent
pub fn convert_yaml_to_json<P: AsRef<Path>, Q: AsRef<Path>>(
    yaml_path: P,
    json_path: Q,
    logger: &dyn Logger,
) -> Result<()> {
    let (yaml_path, json_path) = (yaml_path.as_ref(), json_path.as_ref());

    logger.info(&format!("Loading YAML file '{}' ...", yaml_path.display()));
    let content = read_file(yaml_path)?;
    let conversion_error = |message: String| Error::Conversion { path: yaml_path.to_path_buf(), message };

    let mut document: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| conversion_error(e.to_string()))?;
    document.apply_merge().map_err(|e| conversion_error(e.to_string()))?;
    let json = yaml_to_json(document).map_err(conversion_error)?;
    logger.info(&format!("YAML file '{}' successfully loaded.", yaml_path.display()));

    logger.info(&format!("Dumping JSON file '{}' ...", json_path.display()));
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    json.serialize(&mut serializer)
        .map_err(|e| Error::Conversion { path: json_path.to_path_buf(), message: e.to_string() })?;
    fs::write(json_path, buffer).map_err(|e| Error::io(json_path, e))?;
    logger.info(&format!("JSON file written to '{}'", json_path.display()));

    Ok(())
}

/// Maps a parsed YAML value onto the equivalent JSON value.
///
/// Scalars keep the type the YAML parser gave them. Mapping keys must be
/// scalars and are stringified; tags are dropped.
pub fn yaml_to_json(value: serde_yaml::Value) -> std::result::Result<serde_json::Value, String> {
    use serde_json::Value as Json;
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Json::Null,
        Yaml::Bool(b) => Json::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Json::from(i)
            } else if let Some(u) = n.as_u64() {
                Json::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(Json::Number)
                    .ok_or_else(|| format!("number {n} has no JSON representation"))?
            }
        }
        Yaml::String(s) => Json::String(s),
        Yaml::Sequence(items) => {
            Json::Array(items.into_iter().map(yaml_to_json).collect::<std::result::Result<_, _>>()?)
        }
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                object.insert(mapping_key(key)?, yaml_to_json(value)?);
            }
            Json::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn mapping_key(key: serde_yaml::Value) -> std::result::Result<String, String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => mapping_key(tagged.value),
        other => Err(format!("unsupported mapping key: {other:?}")),
    }
}

pub(crate) fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    Error::Io { path, source: err.into() }
}

fn not_found_or_io(path: &Path, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::NotFound { path: PathBuf::from(path) }
    } else {
        Error::io(path, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{MemoryLogger, NullLogger};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_create_directory_fails_when_present() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a");

        create_directory(&dir, &NullLogger).unwrap();
        assert!(directory_exists(&dir));
        assert!(matches!(create_directory(&dir, &NullLogger), Err(Error::Io { .. })));

        ensure_directory(&dir).unwrap();
        ensure_directory(dir.join("b/c")).unwrap();
        assert!(directory_exists(dir.join("b/c")));
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");
        match read_file(&missing) {
            Err(Error::NotFound { path }) => assert_eq!(path, missing),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_write_file_does_not_create_parents() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested/out.txt");
        assert!(matches!(write_file(&target, "x"), Err(Error::Io { .. })));
    }

    #[test]
    fn test_replace_in_file_counts() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("init.js");
        write_file(&file, "url: \"a\", other: \"a\"").unwrap();

        assert_eq!(replace_in_file(&file, "\"a\"", "'b'").unwrap(), 2);
        assert_eq!(read_file(&file).unwrap(), "url: 'b', other: 'b'");
        assert_eq!(replace_in_file(&file, "\"a\"", "'b'").unwrap(), 0);
    }

    #[test]
    fn test_copy_tree_requires_fresh_destination() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        ensure_directory(source.join("nested")).unwrap();
        write_file(source.join("nested/a.txt"), "a").unwrap();

        let dest = temp_dir.path().join("dest");
        copy_tree(&source, &dest).unwrap();
        assert_eq!(read_file(dest.join("nested/a.txt")).unwrap(), "a");

        assert!(copy_tree(&source, &dest).is_err());
        assert!(matches!(
            copy_tree(temp_dir.path().join("nope"), temp_dir.path().join("x")),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_convert_yaml_to_json_preserves_structure() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = temp_dir.path().join("openapi.yaml");
        let json_path = temp_dir.path().join("openapi.json");
        write_file(
            &yaml,
            "openapi: 3.0.0\ninfo:\n  title: demo\n  version: 1\npaths:\n  /items:\n    get:\n      deprecated: false\n      tags: [a, b]\n      responses:\n        200:\n          description: ok\nratio: 0.5\nnothing: null\n",
        )
        .unwrap();

        let logger = MemoryLogger::new();
        convert_yaml_to_json(&yaml, &json_path, &logger).unwrap();

        let raw = read_file(&json_path).unwrap();
        assert!(raw.starts_with("{\n    \"openapi\""));

        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            parsed,
            json!({
                "openapi": "3.0.0",
                "info": {"title": "demo", "version": 1},
                "paths": {"/items": {"get": {
                    "deprecated": false,
                    "tags": ["a", "b"],
                    "responses": {"200": {"description": "ok"}}
                }}},
                "ratio": 0.5,
                "nothing": null
            })
        );
        let keys: Vec<&String> = parsed.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["openapi", "info", "paths", "ratio", "nothing"]);
        assert!(logger.errors().is_empty());
    }

    #[test]
    fn test_convert_invalid_yaml_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = temp_dir.path().join("bad.yaml");
        write_file(&yaml, "key: [unclosed").unwrap();

        let err = convert_yaml_to_json(&yaml, temp_dir.path().join("bad.json"), &NullLogger).unwrap_err();
        assert!(matches!(err, Error::Conversion { ref path, .. } if path == &yaml));
    }
}
