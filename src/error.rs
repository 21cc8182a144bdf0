//! Error handling for the scaffold application.
//! Defines the error taxonomy and the result alias used throughout the crate.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::DESTINATION_EXISTS_EXIT_CODE;
use crate::logger::Logger;

/// Custom error types for scaffold operations.
///
/// Every variant is fatal to the command that raised it. Path-bearing
/// variants always carry the offending path so the message alone is enough
/// to locate the problem.
#[derive(Error, Debug)]
pub enum Error {
    /// The project directory to be created is already present.
    #[error("Destination '{path}' already exists.")]
    DestinationExists { path: PathBuf },

    /// A required template, archive or intermediate file is missing.
    #[error("File not found: '{path}'.")]
    NotFound { path: PathBuf },

    /// A directory or file operation failed.
    #[error("IO error on '{path}': {source}.")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template references a key absent from the substitution context.
    #[error("Template '{template}' references undefined key '{key}'.")]
    TemplateRender { template: PathBuf, key: String },

    /// The upstream release could not be resolved or downloaded.
    #[error("Upstream fetch failed: {0}.")]
    UpstreamFetch(String),

    /// A template would overwrite a file that existed before the run.
    #[error("Refusing to overwrite existing file '{path}'.")]
    FileConflict { path: PathBuf },

    /// `<base>/temp` exists but was not created by a pipeline run.
    #[error("Staging directory '{path}' exists and was not created by scaffold.")]
    StagingInUse { path: PathBuf },

    /// The release archive could not be read or extracted.
    #[error("Archive error in '{path}': {source}.")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// YAML to JSON conversion failed.
    #[error("Conversion of '{path}' failed: {message}.")]
    Conversion { path: PathBuf, message: String },

    /// The settings file could not be parsed.
    #[error("Configuration error: {0}.")]
    Config(String),

    /// A caller supplied an unusable argument.
    #[error("Invalid argument: {0}.")]
    InvalidArgument(String),

    /// Interactive input could not be read.
    #[error("Prompt error: {0}.")]
    Prompt(String),
}

impl Error {
    /// Wraps an [`io::Error`] together with the path it concerns.
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::Io { path: path.as_ref().to_path_buf(), source }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::DestinationExists { .. } => DESTINATION_EXISTS_EXIT_CODE,
            _ => 1,
        }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Reports the error through the logger's error channel and exits with the
/// error's exit code.
pub fn default_error_handler(err: Error, logger: &dyn Logger) -> ! {
    logger.error(&err.to_string());
    std::process::exit(err.exit_code());
}
