//! Route Swagger - Command-line tool for generating Swagger documents from route manifests.
//!
//! # Usage
//!
//! ```bash
//! route-swagger [OPTIONS] <MANIFEST_PATH>
//! ```
//!
//! # Examples
//!
//! Print the resource listing:
//! ```bash
//! route-swagger ./routes
//! ```
//!
//! Write the API declaration of the `widgets` resource as YAML:
//! ```bash
//! route-swagger ./routes -r widgets -f yaml -o widgets.yaml
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! route-swagger ./routes -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use route_swagger::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Route Swagger starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    info!("Swagger document generation completed successfully");

    Ok(())
}
