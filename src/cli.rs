//! Command-line interface implementation for scaffold.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Args as ClapArgs, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::logger::LoggerKind;
use crate::project::ProjectType;

/// Command-line arguments structure for scaffold.
#[derive(Parser, Debug)]
#[command(author, version, about = "Scaffold: a scaffolding utility for python projects", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Where progress messages go
    #[arg(long, value_enum, default_value_t = LoggerKind::Console, global = true)]
    pub logger: LoggerKind,

    /// Directory to work in instead of the current one
    #[arg(short = 'C', long, value_name = "DIR", global = true)]
    pub base_dir: Option<PathBuf>,

    /// Template directory replacing the templates bundled with the binary
    #[arg(long, value_name = "DIR", global = true)]
    pub templates: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a project in the current directory.
    Init(InitArgs),
    /// Create a new project.
    New(NewArgs),
    /// Interact with Swagger UI.
    #[command(subcommand)]
    Swagger(SwaggerCommand),
}

/// Values placed in the substitution context.
#[derive(ClapArgs, Debug, Default)]
pub struct AuthorArgs {
    /// Author name
    #[arg(short, long)]
    pub author: Option<String>,

    /// Author email
    #[arg(short, long)]
    pub email: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct InitArgs {
    /// Type of the new project
    #[arg(short = 't', long = "type", value_enum, default_value_t = ProjectType::Api)]
    pub project_type: ProjectType,

    /// Project name (defaults to the directory name)
    #[arg(short, long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub author: AuthorArgs,

    /// Overwrite files that already exist
    #[arg(short, long)]
    pub force: bool,

    /// Do not download and embed Swagger UI for API projects
    #[arg(long)]
    pub no_swagger: bool,
}

#[derive(ClapArgs, Debug)]
pub struct NewArgs {
    /// Type of the new project
    #[arg(short = 't', long = "type", value_enum)]
    pub project_type: ProjectType,

    /// Project name; prompted for when omitted
    #[arg(short, long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub author: AuthorArgs,

    /// Initial project version
    #[arg(long, value_name = "VERSION")]
    pub project_version: Option<String>,

    /// Do not download and embed Swagger UI for API projects
    #[arg(long)]
    pub no_swagger: bool,
}

#[derive(Subcommand, Debug)]
pub enum SwaggerCommand {
    /// Get the latest Swagger UI version.
    Version,
    /// Build the Swagger UI.
    Build(BuildArgs),
}

#[derive(ClapArgs, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub author: AuthorArgs,

    /// Project name
    #[arg(short, long)]
    pub project: Option<String>,

    /// Path to the API specification template
    #[arg(short, long, value_name = "PATH")]
    pub yaml: Option<PathBuf>,

    /// Project directory receiving the assets (defaults to `api`)
    #[arg(long, value_name = "DIR")]
    pub target: Option<PathBuf>,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if no command is given, after printing help
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingSubcommand {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
