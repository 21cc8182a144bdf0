//! Common constants used throughout the scaffold application.

/// Suffix marking a file as a template; stripped from output paths.
pub const TEMPLATE_SUFFIX: &str = ".jinja2";

/// Supported configuration file names, in lookup order.
pub const CONFIG_FILES: [&str; 3] = ["scaffold.json", "scaffold.yml", "scaffold.yaml"];

/// Template root applied after the type-specific one.
pub const SHARED_TEMPLATE_ROOT: &str = "shared";

/// Default version placed in the substitution context.
pub const DEFAULT_PROJECT_VERSION: &str = "0.1.0";

/// Exit code used when the destination project directory already exists.
pub const DESTINATION_EXISTS_EXIT_CODE: i32 = 17;

/// Swagger UI upstream locations.
pub const SWAGGER_RELEASE_URL: &str = "https://github.com/swagger-api/swagger-ui/releases/latest";
pub const SWAGGER_ARCHIVE_BASE: &str = "https://github.com/swagger-api/swagger-ui/archive/refs/tags/";

/// Default directory, relative to the base, receiving the Swagger assets.
pub const DEFAULT_SWAGGER_TARGET: &str = "api";

/// Staging layout, relative to the base directory.
pub const STAGING_ROOT: &str = "temp";
/// Written into the staging root so a leftover tree can be told apart from
/// a user directory of the same name.
pub const STAGING_MARKER: &str = "temp/.scaffold-staging";
pub const STAGING_DOWNLOADS: &str = "temp/downloads";
pub const STAGING_EXTRACT: &str = "temp/swagger-ui";
pub const STAGING_SWAGGER: &str = "temp/swagger";
pub const STAGING_STATIC: &str = "temp/swagger/static";
pub const STAGING_JS: &str = "temp/swagger/static/js";
pub const STAGING_CSS: &str = "temp/swagger/static/css";
pub const STAGING_IMG: &str = "temp/swagger/static/img";
pub const STAGING_TEMPLATES: &str = "temp/swagger/templates";

/// Entry document shipped in the distribution and its name once integrated.
pub const SWAGGER_INDEX: &str = "index.html";
pub const SWAGGER_ENTRY: &str = "swaggerui.html";

/// Initializer script and the literal that points it at the public demo.
pub const SWAGGER_INITIALIZER: &str = "swagger-initializer.js";
pub const SWAGGER_DEMO_URL_LITERAL: &str = "\"https://petstore.swagger.io/v2/swagger.json\"";
pub const SWAGGER_LOCAL_URL_LITERAL: &str = "'/static/openapi.json'";

/// Default API specification template, relative to the template directory.
pub const OPENAPI_TEMPLATE: &str = "swagger/openapi.yaml.jinja2";
pub const OPENAPI_YAML: &str = "openapi.yaml";
pub const OPENAPI_JSON: &str = "openapi.json";
