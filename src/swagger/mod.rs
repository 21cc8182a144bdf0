//! Swagger UI embedding for API projects.
//!
//! The latest upstream release is downloaded into a scratch `temp` tree,
//! its `dist` files are sorted into `static/{js,css,img}` and `templates`,
//! the entry page and initializer are rewritten to serve from the project,
//! and the result is copied into the target project.

pub mod html;
pub mod pipeline;
pub mod release;
pub mod staging;

pub use pipeline::{BuildOptions, SwaggerBuilder};
pub use release::{GithubReleases, Release, ReleaseSource};
pub use staging::Staging;
