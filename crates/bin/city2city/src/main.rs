//! # city2city: trip booking CLI
//!
//! Composition root that wires the storage adapter into the application
//! services and runs one command.
//!
//! ## Responsibilities
//! - Parse the command line and load configuration (file, env vars)
//! - Initialise logging
//! - Open the `SQLite` connection pool and run migrations
//! - Construct repositories and services, then dispatch the command
//! - Print the result as JSON on stdout
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod cli;
mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::App;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let db = config
        .storage()
        .build()
        .await
        .context("failed to open database")?;
    tracing::debug!(url = %config.database.url, "database opened");

    let output = App::new(&db).run(cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
