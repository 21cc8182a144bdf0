use scaffold::context::Context;
use scaffold::error::Error;
use scaffold::fs::{read_file, write_file};
use scaffold::renderer::PlaceholderRenderer;
use scaffold::template::TemplateExecutor;
use tempfile::TempDir;

#[test]
fn test_apply_to_generated_path() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("templates/api");
    let out = temp_dir.path().join("out");
    std::fs::create_dir_all(root.join("bin")).unwrap();
    std::fs::create_dir_all(out.join("bin")).unwrap();
    write_file(root.join("bin/run.sh.jinja2"), "echo {{ project_name }} {{ version }}\n").unwrap();

    let context = Context::new().with("project_name", "demo").with("version", "0.1.0");
    let renderer = PlaceholderRenderer::new();
    let executor = TemplateExecutor::new(&root, &out, &context, &renderer);

    let written = executor.apply(root.join("bin/run.sh.jinja2"), None).unwrap();
    assert_eq!(written, out.join("bin/run.sh"));
    assert_eq!(read_file(&written).unwrap(), "echo demo 0.1.0\n");
}

#[test]
fn test_apply_to_explicit_path_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let template = temp_dir.path().join("openapi.yaml.jinja2");
    let target = temp_dir.path().join("openapi.yaml");
    write_file(&template, "title: {{ project_name }}\n").unwrap();
    write_file(&target, "stale").unwrap();

    let context = Context::new().with("project_name", "demo");
    let renderer = PlaceholderRenderer::new();
    let executor = TemplateExecutor::new("", "", &context, &renderer);

    executor.apply(&template, Some(&target)).unwrap();
    assert_eq!(read_file(&target).unwrap(), "title: demo\n");
}

#[test]
fn test_apply_errors() {
    let temp_dir = TempDir::new().unwrap();
    let context = Context::new();
    let renderer = PlaceholderRenderer::new();
    let executor = TemplateExecutor::new(temp_dir.path(), temp_dir.path().join("out"), &context, &renderer);

    let missing = temp_dir.path().join("missing.jinja2");
    assert!(matches!(executor.apply(&missing, None), Err(Error::NotFound { path }) if path == missing));

    let template = temp_dir.path().join("a.txt.jinja2");
    write_file(&template, "{{ author }}").unwrap();
    match executor.apply(&template, None) {
        Err(Error::TemplateRender { template: t, key }) => {
            assert_eq!(t, template);
            assert_eq!(key, "author");
        }
        other => panic!("Expected TemplateRender, got {other:?}"),
    }

    let plain = temp_dir.path().join("b.txt");
    write_file(&plain, "no placeholders").unwrap();
    assert!(matches!(executor.apply(&plain, None), Err(Error::Io { .. })));
    assert!(!temp_dir.path().join("out").exists());
}
