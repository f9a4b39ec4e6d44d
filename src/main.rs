//! stencil's main application entry point.
//! Handles command-line argument parsing and hands the generation over to
//! [`CreateApp`].

use stencil::{
    cli::{get_args, Args},
    constants::FALLBACK_VERSION,
    error::{default_error_handler, Error, Result},
    processor::{CreateApp, CreateAppOptions},
    repository::FileSystemProfileRepository,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Arguments
/// * `args` - Parsed command line arguments
///
/// # Errors
/// * `Error::ConfigurationUnset` if no profile repository is configured
fn run(args: Args) -> Result<()> {
    let repository_root = args.profile_repository.ok_or(Error::ConfigurationUnset)?;
    let repository = FileSystemProfileRepository::new(repository_root);
    log::debug!("Using profile repository at {}", repository.root().display());

    let options = CreateAppOptions {
        app_name: args.app_name,
        inplace: args.inplace,
        profile: args.profile,
        features: args.features,
        base_dir: std::env::current_dir()?,
        force: args.force,
        version: Some(option_env!("CARGO_PKG_VERSION").unwrap_or(FALLBACK_VERSION).to_string()),
    };

    let project = CreateApp::new(&repository).run(&options)?;
    println!("Created {}", project.target_dir.display());
    Ok(())
}
