//! Swagger UI release resolution and download.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use log::debug;
use regex::Regex;
use url::Url;

use crate::constants::{SWAGGER_ARCHIVE_BASE, SWAGGER_RELEASE_URL};
use crate::error::{Error, Result};
use crate::fs::download_file;
use crate::paths::urljoin;

/// The selected entry of the release page breadcrumb holds the tag name.
static RELEASE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<li\b[^>]*\bclass\s*=\s*["'][^"']*\bbreadcrumb-item-selected\b[^"']*["'][^>]*>.*?<a\b[^>]*>(.*?)</a>"#,
    )
    .expect("release tag pattern is valid")
});

/// One upstream release and where its archive lives locally once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag: String,
    pub version: String,
    pub archive_url: String,
    pub archive_file: PathBuf,
}

impl Release {
    /// Derives the release descriptor from a tag; the archive is placed in
    /// `downloads_dir`.
    pub fn new<P: AsRef<Path>>(tag: &str, downloads_dir: P) -> Result<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(Error::InvalidArgument("empty release tag".to_string()));
        }

        let archive_url = urljoin(Some(SWAGGER_ARCHIVE_BASE), Some(&format!("{tag}.zip")))?;
        Url::parse(&archive_url)
            .map_err(|e| Error::InvalidArgument(format!("archive URL '{archive_url}': {e}")))?;

        Ok(Self {
            tag: tag.to_string(),
            version: strip_version_prefix(tag).to_string(),
            archive_url,
            archive_file: downloads_dir.as_ref().join(format!("swagger-ui-{tag}.zip")),
        })
    }

    /// Directory the archive unpacks into, relative to the extraction root.
    pub fn extracted_dir_name(&self) -> String {
        format!("swagger-ui-{}", self.version)
    }
}

/// Removes a single leading `v`.
pub fn strip_version_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// Extracts the release tag from the upstream "latest release" page.
pub fn parse_release_tag(html: &str) -> Result<String> {
    let tag = RELEASE_TAG
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|tag| !tag.is_empty())
        .ok_or_else(|| {
            Error::UpstreamFetch("release page has no selected breadcrumb item".to_string())
        })?;
    Ok(tag.to_string())
}

/// Where releases come from.
pub trait ReleaseSource {
    /// Latest release tag, e.g. `v5.17.14`.
    fn latest_tag(&self) -> Result<String>;

    /// Writes the release archive to `release.archive_file`.
    fn download(&self, release: &Release) -> Result<()>;
}

/// Releases published on GitHub, fetched over blocking HTTP.
pub struct GithubReleases {
    client: reqwest::blocking::Client,
    release_url: Url,
}

impl GithubReleases {
    pub fn new() -> Result<Self> {
        let release_url = Url::parse(SWAGGER_RELEASE_URL)
            .map_err(|e| Error::InvalidArgument(format!("release URL: {e}")))?;
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| Error::UpstreamFetch(format!("HTTP client: {e}")))?;
        Ok(Self { client, release_url })
    }
}

impl ReleaseSource for GithubReleases {
    fn latest_tag(&self) -> Result<String> {
        debug!("Resolving latest release from {}", self.release_url);
        let response = self
            .client
            .get(self.release_url.clone())
            .send()
            .map_err(|e| Error::UpstreamFetch(format!("GET {}: {e}", self.release_url)))?;

        if !response.status().is_success() {
            return Err(Error::UpstreamFetch(format!(
                "GET {}: HTTP {}",
                self.release_url,
                response.status()
            )));
        }

        let body = response
            .text()
            .map_err(|e| Error::UpstreamFetch(format!("reading {}: {e}", self.release_url)))?;
        parse_release_tag(&body)
    }

    fn download(&self, release: &Release) -> Result<()> {
        let bytes = download_file(&self.client, &release.archive_url, &release.archive_file)?;
        debug!("Downloaded {bytes} bytes from {}", release.archive_url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_from_tag() {
        let release = Release::new("v5.17.14", "temp/downloads").unwrap();
        assert_eq!(release.version, "5.17.14");
        assert_eq!(
            release.archive_url,
            "https://github.com/swagger-api/swagger-ui/archive/refs/tags/v5.17.14.zip"
        );
        assert_eq!(release.archive_file, PathBuf::from("temp/downloads/swagger-ui-v5.17.14.zip"));
        assert_eq!(release.extracted_dir_name(), "swagger-ui-5.17.14");
    }

    #[test]
    fn test_version_prefix_is_single_character() {
        assert_eq!(strip_version_prefix("v5.0.0"), "5.0.0");
        assert_eq!(strip_version_prefix("vv5"), "v5");
        assert_eq!(strip_version_prefix("5.0.0"), "5.0.0");
        assert_eq!(strip_version_prefix("release-5"), "release-5");
    }

    #[test]
    fn test_empty_tag_rejected() {
        assert!(matches!(Release::new("  ", "d"), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_release_tag() {
        let html = r#"
            <ol class="breadcrumb">
              <li class="breadcrumb-item"><a href="/swagger-api/swagger-ui/releases">Releases</a></li>
              <li class="breadcrumb-item breadcrumb-item-selected">
                <a href="/swagger-api/swagger-ui/releases/tag/v5.17.14"> v5.17.14 </a>
              </li>
            </ol>"#;
        assert_eq!(parse_release_tag(html).unwrap(), "v5.17.14");
    }

    #[test]
    fn test_parse_release_tag_missing_marker() {
        let html = r#"<li class="breadcrumb-item"><a href="/releases">Releases</a></li>"#;
        assert!(matches!(parse_release_tag(html), Err(Error::UpstreamFetch(_))));
    }
}
