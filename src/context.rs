//! Substitution context: the flat key/value map templates are rendered with.

use indexmap::IndexMap;

use crate::paths::slugify;

/// Ordered string-to-string map consulted by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: IndexMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Standard project context: author, author_email, project_name,
    /// project_slug and version.
    pub fn for_project(author: &str, author_email: &str, project_name: &str, version: &str) -> Self {
        Self::new()
            .with("author", author)
            .with("author_email", author_email)
            .with("project_name", project_name)
            .with("project_slug", slugify(project_name))
            .with("version", version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_project_keys_in_order() {
        let context = Context::for_project("Ada", "ada@example.com", "My App", "1.0.0");
        let keys: Vec<&str> = context.keys().collect();
        assert_eq!(keys, ["author", "author_email", "project_name", "project_slug", "version"]);
        assert_eq!(context.get("project_slug"), Some("my-app"));
        assert_eq!(context.get("missing"), None);
    }
}
