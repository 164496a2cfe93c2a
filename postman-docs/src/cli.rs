///
/// This module implements the CLI interface for postman-docs: command parsing,
/// config loading and wiring of the core pipeline to the HTTP publisher.
///
/// All business logic (collection model, page generation, synchronisation) lives in
/// the [`postman-docs-core`] crate. This module is strictly CLI glue.
///
/// ## Commands
/// - `generate`: render the collection to markdown files only.
/// - `sync`: render, publish to the docs host, delete stale pages, save the manifest.
///
/// Both commands exit non-zero when any page failed to write or publish; the failures
/// are logged as they happen and summarised at the end.
///
/// [`postman-docs-core`]: ../../postman-docs-core/
use crate::load_config::{load_config, publish_config, CliConfig};
use crate::publish::ReadmeClient;
use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use postman_docs_core::collection::Collection;
use postman_docs_core::generate::{generate, GenerateReport};
use postman_docs_core::manifest::SlugManifest;
use postman_docs_core::synchronise::synchronise;
use std::path::PathBuf;

/// CLI for postman-docs: turn a Postman collection into published documentation pages.
#[derive(Parser)]
#[clap(
    name = "postman-docs",
    version,
    about = "Generate markdown docs from a Postman collection and sync them to a docs host"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the collection to markdown files
    Generate {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
    /// Render the collection, publish every page and delete pages that disappeared
    Sync {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Generate { config } => {
            let config = load_config(config)?;
            tracing::info!(command = "generate", "Starting page generation");
            let report = generate_pages(&config)?;
            println!(
                "Generated {} pages in {}",
                report.pages.len(),
                config.generate.output_dir.display()
            );
            check_write_failures(&report)
        }
        Commands::Sync { config } => {
            let config = load_config(config)?;
            let publish = publish_config(&config)?;
            tracing::info!(command = "sync", "Starting synchronisation process");

            let generated = generate_pages(&config)?;
            let client = ReadmeClient::new(&publish)?;
            let previous = SlugManifest::load(&publish.manifest_file)?;

            println!("Synchronise starting...");
            let report =
                synchronise(&generated.pages, &previous, &publish.synchronise, &client).await;
            report.manifest.save(&publish.manifest_file)?;

            println!(
                "Synchronise complete: {} created, {} updated, {} deleted, {} failed",
                report.created.len(),
                report.updated.len(),
                report.deleted.len(),
                report.failures.len()
            );
            for failure in &report.failures {
                println!(
                    "  {:?} {} failed: {}",
                    failure.action, failure.slug, failure.error
                );
            }

            check_write_failures(&generated)?;
            if !report.is_success() {
                tracing::error!(
                    command = "sync",
                    failures = report.failures.len(),
                    "Synchronisation finished with failures"
                );
                bail!(
                    "Synchronisation failed for {} remote call(s)",
                    report.failures.len()
                );
            }
            tracing::info!(command = "sync", "Synchronisation complete");
            Ok(())
        }
    }
}

fn generate_pages(config: &CliConfig) -> Result<GenerateReport> {
    let collection = Collection::load(&config.generate.source_file)?;
    Ok(generate(&collection, &config.generate.to_generate_config())?)
}

fn check_write_failures(report: &GenerateReport) -> Result<()> {
    if report.write_failures.is_empty() {
        return Ok(());
    }
    for failure in &report.write_failures {
        println!(
            "  could not write {}: {}",
            failure.path.display(),
            failure.error
        );
    }
    bail!(
        "{} page(s) could not be written to disk",
        report.write_failures.len()
    )
}
