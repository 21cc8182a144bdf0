//! Rewrites asset references in the Swagger UI entry document so it can be
//! served as a server-side template.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::Result;
use crate::fs::{read_file, write_file};
use crate::paths::get_extension;

static ASSET_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<(link|script)\b(?:[^>"']|"[^"]*"|'[^']*')*>"#).expect("asset tag pattern is valid")
});

/// One attribute with its leading whitespace. Matching whole attributes left
/// to right keeps quoted values from being read as attributes themselves.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s+)([^\s"'<>/=]+)(?:(\s*=\s*)(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("attribute pattern is valid")
});

/// Static asset folders the rewritten references point into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    Img,
    Js,
}

impl AssetKind {
    pub fn folder(self) -> &'static str {
        match self {
            AssetKind::Css => "css",
            AssetKind::Img => "img",
            AssetKind::Js => "js",
        }
    }
}

/// `{{ url_for('static', filename='<kind>/<name>') }}`
pub fn static_reference(kind: AssetKind, name: &str) -> String {
    format!("{{{{ url_for('static', filename='{}/{}') }}}}", kind.folder(), name)
}

/// Returns the templated replacement for one reference, or `None` when the
/// reference should stay as it is.
///
/// Stylesheet and PNG links and every script source are rewritten; a
/// leading `./` is dropped and the rest of the name kept. Absolute URLs,
/// root paths and values that are already templated are left alone.
pub fn rewrite_reference(tag: &str, value: &str) -> Option<String> {
    if value.is_empty()
        || value.contains("://")
        || value.starts_with("//")
        || value.starts_with('/')
        || value.starts_with("data:")
        || value.starts_with("{{")
    {
        return None;
    }
    let name = value.strip_prefix("./").unwrap_or(value);

    let kind = if tag.eq_ignore_ascii_case("script") {
        AssetKind::Js
    } else {
        match get_extension(name).as_deref() {
            Some("css") => AssetKind::Css,
            Some("png") => AssetKind::Img,
            _ => return None,
        }
    };
    Some(static_reference(kind, name))
}

/// Rewrites `<link href>` and `<script src>` references in an HTML document.
pub fn rewrite_entry_document(html: &str) -> String {
    ASSET_TAG
        .replace_all(html, |tag_caps: &Captures| {
            let tag_name = tag_caps[1].to_string();
            let wanted = if tag_name.eq_ignore_ascii_case("script") { "src" } else { "href" };

            ATTRIBUTE
                .replace_all(&tag_caps[0], |attr: &Captures| {
                    let original = attr[0].to_string();
                    let Some(equals) = attr.get(3) else { return original };
                    if !attr[2].eq_ignore_ascii_case(wanted) {
                        return original;
                    }
                    let value = attr
                        .get(4)
                        .or_else(|| attr.get(5))
                        .or_else(|| attr.get(6))
                        .map_or("", |m| m.as_str());
                    match rewrite_reference(&tag_name, value) {
                        Some(rewritten) => {
                            format!("{}{}{}\"{}\"", &attr[1], &attr[2], equals.as_str(), rewritten)
                        }
                        None => original,
                    }
                })
                .into_owned()
        })
        .into_owned()
}

/// Rewrites the entry document in place.
pub fn inject_templates<P: AsRef<Path>>(index_file: P) -> Result<()> {
    let index_file = index_file.as_ref();
    let html = read_file(index_file)?;
    write_file(index_file, &rewrite_entry_document(&html))
}
