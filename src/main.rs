//! Dataset Stager - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use dataset_stager::{
    cli::{Args, Command},
    config::{validate_config, Config},
    error::{exit_codes, Error, Result},
    fs::{Split, StageOptions},
    output::{
        print_attention, print_data_summary, print_failure, print_note, print_ready,
        print_settings, print_stage_report,
    },
    source::DirectoryDataSource,
};

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_failure(&format!("{}", e));
            match e {
                Error::Config(_) | Error::ConfigValidation { .. } | Error::TomlParse(_) => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::NotFound { .. } | Error::NotADirectory { .. } | Error::InvalidSplit(_) => {
                    ExitCode::from(exit_codes::NOT_FOUND as u8)
                }
                Error::RootNotEmpty { .. }
                | Error::StageConflict { .. }
                | Error::InvalidStaging(_)
                | Error::Walk(_) => ExitCode::from(exit_codes::STAGING_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Load configuration
    let (mut config, found) = Config::load_or_default(&args.config)?;
    if !found {
        tracing::debug!(
            "Configuration file {} not found, using defaults",
            args.config.display()
        );
    }

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    match args.command.clone().unwrap_or(Command::Check) {
        Command::Check => check(&config),
        Command::Summary { json } => summary(&config, json),
        Command::List { split } => list(&config, split),
        Command::Stage(stage) => {
            print_settings(
                &config.data_root().display().to_string(),
                &config.staging.mode.to_string(),
                &config.staging.on_conflict.to_string(),
            );

            let source = DirectoryDataSource::new(config.data_root());
            let report = source.stage_with(&stage.source, &StageOptions::from(&config.staging))?;

            print_stage_report(&report);
            print_ready(&format!("Data staged at {}", source.root().display()));
            Ok(exit_codes::SUCCESS)
        }
        Command::InitConfig { force } => {
            if args.config.exists() && !force {
                return Err(Error::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    args.config.display()
                )));
            }
            config.save(&args.config)?;
            print_ready(&format!("Wrote configuration to {}", args.config.display()));
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Run the availability check and print the report.
fn check(config: &Config) -> Result<i32> {
    let source = DirectoryDataSource::open(config.data_root())?;
    print_data_summary(&source.summary());

    if source.check_availability() {
        print_ready(&format!("Data is ready in {}", source.root().display()));
        Ok(exit_codes::SUCCESS)
    } else {
        print_attention(&format!("No data found in {}", source.root().display()));
        Ok(exit_codes::NO_DATA)
    }
}

fn summary(config: &Config, json: bool) -> Result<i32> {
    let source = DirectoryDataSource::open(config.data_root())?;
    let summary = source.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_data_summary(&summary);
    }

    Ok(exit_codes::SUCCESS)
}

fn list(config: &Config, split: Split) -> Result<i32> {
    let source = DirectoryDataSource::open(config.data_root())?;
    let images = source.list_images(split)?;

    if images.is_empty() {
        print_note(&format!("No images in {} split", split));
    }
    for image in &images {
        println!("{}", image.display());
    }

    Ok(exit_codes::SUCCESS)
}
