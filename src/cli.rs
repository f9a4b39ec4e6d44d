//! Command-line interface implementation for stencil.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::constants::DEFAULT_PROFILE;

/// Command-line arguments structure for stencil.
#[derive(Parser, Debug)]
#[command(author, version, about = "stencil: generate projects from composable profiles", long_about = None)]
pub struct Args {
    /// Application name, optionally prefixed with its package (`group.app`)
    #[arg(value_name = "APP_NAME")]
    pub app_name: Option<String>,

    /// Generate the application into the current directory
    #[arg(long)]
    pub inplace: bool,

    /// Profile to generate the application from
    #[arg(short, long, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Comma-separated features to apply instead of the profile defaults
    #[arg(long, value_delimiter = ',')]
    pub features: Option<Vec<String>>,

    /// Directory containing the available profiles
    #[arg(long, env = "STENCIL_PROFILE_REPOSITORY", value_name = "DIR")]
    pub profile_repository: Option<PathBuf>,

    /// Generate into an existing directory
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
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
