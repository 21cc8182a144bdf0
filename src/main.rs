//! Scaffold's main application entry point and orchestration logic.
//! Handles command-line argument parsing and dispatches to project
//! generation and the Swagger UI pipeline.

use std::path::{Path, PathBuf};

use dialoguer::Input;
use scaffold::{
    bundle::{TemplateFile, TemplateSource},
    cli::{get_args, AuthorArgs, BuildArgs, Command, InitArgs, NewArgs, SwaggerCommand},
    config::{load_settings, Settings},
    constants::OPENAPI_TEMPLATE,
    context::Context,
    error::{default_error_handler, Error, Result},
    logger::{init_logger, Logger},
    processor::CollisionPolicy,
    project::{project_destination, Generator},
    renderer::PlaceholderRenderer,
    swagger::{BuildOptions, GithubReleases, SwaggerBuilder},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose, args.logger);
    let logger = args.logger.build();

    if let Err(err) = run(args, &*logger) {
        default_error_handler(err, &*logger);
    }
}

/// Everything a command needs besides its own arguments.
struct Session<'a> {
    base: PathBuf,
    templates: TemplateSource,
    settings: Settings,
    renderer: PlaceholderRenderer,
    logger: &'a dyn Logger,
}

fn run(args: scaffold::cli::Args, logger: &dyn Logger) -> Result<()> {
    let base = match args.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| Error::io(".", e))?,
    };
    let settings = load_settings(&base)?;
    let templates = settings.template_source(&base, args.templates.as_deref());
    let session =
        Session { base, templates, settings, renderer: PlaceholderRenderer::new(), logger };

    match args.command {
        Command::Init(init) => run_init(&session, init),
        Command::New(new) => run_new(&session, new),
        Command::Swagger(SwaggerCommand::Version) => {
            let source = GithubReleases::new()?;
            let builder = SwaggerBuilder::new(&session.base, &source, &session.renderer, logger);
            println!("{}", builder.latest_release()?.version);
            Ok(())
        }
        Command::Swagger(SwaggerCommand::Build(build)) => run_build(&session, build),
    }
}

fn run_init(session: &Session, args: InitArgs) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => directory_name(&session.base)?,
    };
    session.logger.info(&format!("Initializing project \"{name}\" ..."));

    let context = project_context(session, &args.author, &name, None);
    let policy = if args.force { CollisionPolicy::Overwrite } else { CollisionPolicy::Refuse };
    Generator::new(session.templates.clone(), &session.renderer, session.logger).init(
        args.project_type,
        &session.base,
        &context,
        policy,
    )?;

    if args.project_type.embeds_swagger() && !args.no_swagger {
        embed_swagger(session, &session.base, &context)?;
    }
    session.logger.info(&format!("Project \"{name}\" initialized in '{}'.", session.base.display()));
    Ok(())
}

fn run_new(session: &Session, args: NewArgs) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("project name")
            .interact_text()
            .map_err(|e| Error::Prompt(e.to_string()))?,
    };
    let destination = project_destination(&session.base, &name)?;
    session.logger.info(&format!("Creating project \"{name}\" ..."));

    let context = project_context(session, &args.author, &name, args.project_version.as_deref());
    Generator::new(session.templates.clone(), &session.renderer, session.logger).create(
        args.project_type,
        &destination,
        &context,
    )?;

    if args.project_type.embeds_swagger() && !args.no_swagger {
        embed_swagger(session, &destination, &context)?;
    }
    session.logger.info(&format!("Project \"{name}\" created in '{}'.", destination.display()));
    Ok(())
}

fn run_build(session: &Session, args: BuildArgs) -> Result<()> {
    let name = match args.project {
        Some(project) => project,
        None => directory_name(&session.base)?,
    };
    let context = project_context(session, &args.author, &name, None);
    let options = BuildOptions {
        target_dir: session.base.join(args.target.unwrap_or_else(|| session.settings.swagger_target.clone())),
        api_template: match args.yaml {
            Some(path) => TemplateFile::Path(session.base.join(path)),
            None => session.templates.file(OPENAPI_TEMPLATE),
        },
        context,
    };

    let source = GithubReleases::new()?;
    SwaggerBuilder::new(&session.base, &source, &session.renderer, session.logger).build(&options)?;
    Ok(())
}

/// Runs the Swagger pipeline for a freshly generated API project.
fn embed_swagger(session: &Session, project_dir: &Path, context: &Context) -> Result<()> {
    let options = BuildOptions {
        target_dir: project_dir.join(&session.settings.swagger_target),
        api_template: session.templates.file(OPENAPI_TEMPLATE),
        context: context.clone(),
    };
    let source = GithubReleases::new()?;
    SwaggerBuilder::new(&session.base, &source, &session.renderer, session.logger).build(&options)?;
    Ok(())
}

fn project_context(session: &Session, author: &AuthorArgs, name: &str, version: Option<&str>) -> Context {
    let settings = &session.settings;
    Context::for_project(
        author.author.as_deref().unwrap_or(&settings.author),
        author.email.as_deref().unwrap_or(&settings.author_email),
        name,
        version.unwrap_or(&settings.version),
    )
}

fn directory_name(path: &Path) -> Result<String> {
    path.canonicalize()
        .map_err(|e| Error::io(path, e))?
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidArgument(format!("cannot derive a project name from '{}'", path.display())))
}
