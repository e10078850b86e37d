//! CLI for running prayer-time ingestion outside the HTTP server
//!
//! Intended for cron / scheduled jobs. Prints JSON so the caller can parse
//! the report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use server_core::config::Config;
use server_core::domains::prayer_times::SourceRegistry;
use server_core::kernel::ServerDeps;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ingest_cli")]
#[command(about = "Prayer-time ingestion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one ingestion now and print the report
    Run {
        /// Skip applying migrations before the run
        #[arg(long)]
        skip_migrations: bool,
    },

    /// List the registered timetable sources
    Sources,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sources => {
            let summaries = SourceRegistry::default().summaries();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Commands::Run { skip_migrations } => {
            let config = Config::from_env().context("Failed to load configuration")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;

            if !skip_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to run migrations")?;
            }

            let deps = ServerDeps::from_config(&config, pool)?;
            let report = deps.orchestrator().run().await?;

            println!("{}", serde_json::to_string_pretty(&report)?);

            // Nothing stored for any source
            if !report.success {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
