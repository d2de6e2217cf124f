//! Terraform generator for classified Salesforce objects.
//!
//! Reads a CSV produced by `sflow` and prints an AppFlow flow plus the
//! matching Snowflake table.
//!
//! Usage:
//!   terraform_gen Account.csv                    # print to stdout
//!   terraform_gen Account.csv -o account.tf      # write to a file
//!   terraform_gen export.csv --object Account    # object name not in file name

use chrono::Utc;
use clap::Parser;
use sflow::config::Settings;
use sflow::pipeline::generate;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terraform_gen")]
#[command(about = "Render AppFlow and Snowflake Terraform from an sflow CSV")]
#[command(version)]
struct Cli {
    /// CSV file written by sflow
    file: PathBuf,

    /// Object name (defaults to the file name up to its first '.')
    #[arg(long)]
    object: Option<String>,

    /// Write Terraform to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a config file (defaults to sflow.toml lookup)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> sflow::Result<()> {
    let settings = Settings::load_from(cli.config.as_deref())?;
    let hcl = generate(&cli.file, cli.object.as_deref(), &settings.terraform, Utc::now())?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &hcl)?;
            info!(path = %path.display(), "wrote terraform");
        }
        None => print!("{}", hcl),
    }

    Ok(())
}
