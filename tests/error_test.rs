use std::io;
use std::path::PathBuf;

use scaffold::constants::DESTINATION_EXISTS_EXIT_CODE;
use scaffold::error::Error;

#[test]
fn test_io_error_keeps_path() {
    let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
    let err = Error::io("/srv/out", io_err);

    match &err {
        Error::Io { path, .. } => assert_eq!(path, &PathBuf::from("/srv/out")),
        _ => panic!("Expected Io variant"),
    }
    assert_eq!(err.to_string(), "IO error on '/srv/out': denied.");
}

#[test]
fn test_error_display() {
    let err = Error::Config("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::TemplateRender { template: PathBuf::from("t/README.md.jinja2"), key: "author".to_string() };
    assert_eq!(err.to_string(), "Template 't/README.md.jinja2' references undefined key 'author'.");
}

#[test]
fn test_exit_codes() {
    let exists = Error::DestinationExists { path: PathBuf::from("demo") };
    assert_eq!(exists.exit_code(), DESTINATION_EXISTS_EXIT_CODE);
    assert_ne!(exists.exit_code(), 0);

    let missing = Error::NotFound { path: PathBuf::from("x") };
    assert_eq!(missing.exit_code(), 1);
}
