//! Scaffold is a template processing system for project scaffolding.
//! It materializes project trees from template roots and can embed a
//! repackaged Swagger UI release into generated API projects.

/// Templates compiled into the binary
pub mod bundle;

/// Command-line interface module for the scaffold application
pub mod cli;

/// Optional settings file (scaffold.json, scaffold.yml, scaffold.yaml)
pub mod config;

/// Common constants: template suffix, staging layout, upstream URLs
pub mod constants;

/// Substitution context handed to the renderer
pub mod context;

/// Error types and handling for the scaffold application
pub mod error;

/// Filesystem primitives
pub mod fs;

/// Pluggable user-facing loggers
pub mod logger;

/// Path-string helpers
pub mod paths;

/// Overlay of template roots onto a destination tree
pub mod processor;

/// Project types and generation
pub mod project;

/// Placeholder rendering
pub mod renderer;

/// Swagger UI download and repackaging
pub mod swagger;

/// Template path mapping and single-file rendering
pub mod template;
