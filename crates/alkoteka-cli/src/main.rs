use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use alkoteka_core::Product;
use alkoteka_scraper::{Harvester, LogProgress};

#[derive(Debug, Parser)]
#[command(name = "alkoteka-cli")]
#[command(about = "Locality-scoped catalog harvester for the Alkoteka web API")]
struct Cli {
    /// Locality slug to harvest (overrides ALKOTEKA_LOCALITY).
    #[arg(long)]
    city: Option<String>,

    /// Write records as JSON lines to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = alkoteka_core::load_config_from_env().context("invalid configuration")?;
    if let Some(city) = cli.city {
        config.locality = city;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let harvester = Harvester::new(config).context("failed to build harvester")?;
    let progress = LogProgress::new();
    let products = harvester
        .run(&progress)
        .await
        .context("harvest run failed")?;

    write_records(&products, cli.out.as_deref())?;
    Ok(())
}

/// Emit one JSON object per line, to the given file or stdout.
fn write_records(products: &[Product], out: Option<&std::path::Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            for product in products {
                serde_json::to_writer(&mut writer, product)?;
                writeln!(writer)?;
            }
            writer.flush()?;
            tracing::info!(records = products.len(), path = %path.display(), "records written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            for product in products {
                serde_json::to_writer(&mut writer, product)?;
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}
