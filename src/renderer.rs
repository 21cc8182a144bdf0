//! Template rendering for scaffold.
//! Implements single-pass `{{ key }}` substitution against a [`Context`].
//! Every other `{{ ... }}` expression is an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::Context;

/// Either a `{% raw %}...{% endraw %}` block, copied verbatim without its
/// delimiters, or any `{{ ... }}` expression.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{%-?\s*raw\s*-?%\}(.*?)\{%-?\s*endraw\s*-?%\}|\{\{(.*?)\}\}")
        .expect("template token pattern is valid")
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// A placeholder the context cannot satisfy: a missing key, or an
/// expression that is not a bare identifier (filters, attributes, calls).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedKey(pub String);

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template source
    /// * `context` - Values for the placeholders
    ///
    /// # Returns
    /// * `Result<String, UndefinedKey>` - Rendered text
    ///
    /// # Errors
    /// * [`UndefinedKey`] for the first placeholder that cannot be resolved
    fn render(&self, template: &str, context: &Context) -> Result<String, UndefinedKey>;
}

/// Placeholder substitution with no control flow.
///
/// Text that must keep literal braces goes inside a raw block.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, context: &Context) -> Result<String, UndefinedKey> {
        let mut rendered = String::with_capacity(template.len());
        let mut last = 0;

        for caps in TOKEN.captures_iter(template) {
            let Some(whole) = caps.get(0) else { continue };
            rendered.push_str(&template[last..whole.start()]);
            last = whole.end();

            if let Some(raw) = caps.get(1) {
                rendered.push_str(raw.as_str());
                continue;
            }

            let expression = caps.get(2).map_or("", |m| m.as_str()).trim();
            if !IDENTIFIER.is_match(expression) {
                return Err(UndefinedKey(expression.to_string()));
            }
            let value = context.get(expression).ok_or_else(|| UndefinedKey(expression.to_string()))?;
            rendered.push_str(value);
        }
        rendered.push_str(&template[last..]);

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context::new().with("name", "test").with("version", "1.2.3")
    }

    #[test]
    fn test_render_substitutes_every_occurrence() {
        let renderer = PlaceholderRenderer::new();
        let result = renderer.render("Hello {{ name }}! {{name}} v{{  version }}", &context());
        assert_eq!(result.unwrap(), "Hello test! test v1.2.3");
    }

    #[test]
    fn test_render_fails_on_undefined_key() {
        let renderer = PlaceholderRenderer::new();
        let result = renderer.render("{{ name }} by {{ author }}", &context());
        assert_eq!(result, Err(UndefinedKey("author".to_string())));
    }

    #[test]
    fn test_render_rejects_expressions() {
        let renderer = PlaceholderRenderer::new();
        let context = context().with("project_name", "demo");

        for (template, expression) in [
            ("{{ project_name | upper }}", "project_name | upper"),
            ("{{ author.name }}", "author.name"),
            ("{{ project-name }}", "project-name"),
            ("{{ url_for('static', filename='a.css') }}", "url_for('static', filename='a.css')"),
            ("{{}}", ""),
        ] {
            assert_eq!(renderer.render(template, &context), Err(UndefinedKey(expression.to_string())));
        }
    }

    #[test]
    fn test_render_copies_raw_blocks() {
        let renderer = PlaceholderRenderer::new();
        let template = "{{ name }}: {% raw %}<link href=\"{{ url_for('static') }}\">{% endraw %}";
        assert_eq!(
            renderer.render(template, &context()).unwrap(),
            "test: <link href=\"{{ url_for('static') }}\">"
        );
    }

    #[test]
    fn test_render_is_single_pass() {
        let renderer = PlaceholderRenderer::new();
        let context = Context::new().with("a", "{{ b }}");
        assert_eq!(renderer.render("{{ a }}", &context).unwrap(), "{{ b }}");
    }
}
