use std::path::PathBuf;

use clap::{Parser, Subcommand};

use phrase_prune::config::{load_config, DEFAULT_CONFIG_PATH};
use phrase_prune::models::join_key_path;
use phrase_prune::{PhraseClient, Pruner};

#[derive(Parser)]
#[command(name = "phrase-prune", version, about = "Keeps Phrase translations in sync with local i18next resources")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prunes translations by deleting unused keys
    Prune {
        /// Do not apply changes
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        dry_run: bool,

        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Prune { dry_run, config } => prune(&config, dry_run).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn prune(config_path: &std::path::Path, dry_run: bool) -> phrase_prune::Result<()> {
    let config = load_config(config_path)?;
    let client = PhraseClient::new(reqwest::Client::new(), &config.access_token);
    let mut pruner = Pruner::new(config, client);

    let summary = pruner.prune(dry_run).await?;
    match &summary.report {
        None => {
            for (namespace, keys) in &summary.unmentioned {
                for key in keys {
                    println!("{}:{}", namespace, join_key_path(key));
                }
            }
            println!(
                "{} unmentioned keys found in remote resources. Pass --dry-run false to apply changes.",
                summary.unmentioned_count()
            );
        }
        Some(report) => {
            for batch in &report.batches {
                println!(
                    "{}: {} keys requested, {} records affected",
                    batch.namespace,
                    batch.key_names.len(),
                    batch.records_affected
                );
            }
            println!(
                "{} keys deleted in remote resources",
                report.records_affected()
            );
        }
    }
    Ok(())
}
