//! sflow CLI - Extract and classify Salesforce field metadata
//!
//! Usage:
//!   sflow <OBJECT> [--output <file.csv>] [--config <sflow.toml>]
//!
//! Credentials are read from SFDC_USERNAME, SFDC_PASSWORD and
//! SFDC_SECURITYTOKEN unless the config file says otherwise.
//!
//! Examples:
//!   sflow Opportunity
//!   sflow Invoice__c --output staging/Invoice__c.csv
//!   sflow Account --no-csv -v

use clap::Parser;
use sflow::config::Settings;
use sflow::metadata::SalesforceMetadataProvider;
use sflow::pipeline::{extract, format_record_table};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sflow")]
#[command(about = "Classify a Salesforce object's fields and write them to <OBJECT>.csv")]
#[command(version)]
struct Cli {
    /// API name of the Salesforce object (e.g. Opportunity, Invoice__c)
    object: String,

    /// CSV path to write (defaults to <OBJECT>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only print the classified fields; do not write a CSV
    #[arg(long, conflicts_with = "output")]
    no_csv: bool,

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

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 if quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> sflow::Result<()> {
    let settings = Settings::load_from(cli.config.as_deref())?;
    let sf = &settings.salesforce;

    let provider = SalesforceMetadataProvider::with_options(
        sf.credentials()?,
        sf.resolved_login_url()?,
        &sf.api_version,
        sf.timeout(),
    )?;

    let csv_path = if cli.no_csv {
        None
    } else {
        Some(cli.output.unwrap_or_else(|| PathBuf::from(format!("{}.csv", cli.object))))
    };

    let records = extract(&provider, &cli.object, &settings.filter.to_filter(), csv_path.as_deref()).await?;

    print!("{}", format_record_table(&records));
    if let Some(path) = csv_path {
        eprintln!("Wrote {} fields to {}", records.len(), path.display());
    }

    Ok(())
}
