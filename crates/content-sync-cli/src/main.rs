mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use content_sync::{Environment, LocaleMap, RunContext, SyncOutcome, sync_file};
use content_sync_kontent::{ManagementClient, ManagementClientConfig};

#[derive(Parser)]
#[command(name = "content-sync")]
#[command(about = "Sync a localized CSV into the content management backend")]
struct Cli {
    /// Path to the CSV file to ingest
    #[arg(long)]
    file: PathBuf,

    /// Target environment (dev or prod)
    #[arg(long)]
    env: Environment,

    /// Content type codename for created items
    #[arg(long)]
    content_type: String,

    /// Emit the run result as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn print_summary(outcome: &SyncOutcome) {
    println!(
        "Processed {} items ({} unprocessed).",
        outcome.processed_count, outcome.unprocessed_count
    );

    for record in &outcome.unprocessed_records {
        eprintln!("  {}: {}", record.name, record.reason);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let app_config = config::load_config();
    let resolved = config::resolve(&app_config, cli.env)?;

    let locales = LocaleMap::markets();
    let ctx = RunContext::new(cli.env, resolved.project_id.clone(), cli.content_type);

    let client = ManagementClient::new(ManagementClientConfig {
        base_url: resolved.base_url,
        project_id: resolved.project_id,
        api_key: resolved.api_key,
    });

    if !cli.json {
        println!("Processing {} against {}...", cli.file.display(), cli.env);
    }

    let outcome = sync_file(&client, &cli.file, &locales, &ctx)
        .await
        .with_context(|| format!("failed to process {}", cli.file.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_summary(&outcome);
    }

    Ok(())
}
