use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bpy331_aggregator::notify::TracingNotifier;
use bpy331_aggregator::resolver::ChecksumResolver;
use bpy331_aggregator::{run, BatchConfig};
use chrono::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    anyhow::ensure!(
        args.len() == 4,
        "Usage: {} <data-dir> <processed-log> <backup-dir>",
        args.first()
            .map(String::as_str)
            .unwrap_or("bpy331-aggregator")
    );

    let config = BatchConfig {
        data_dir: PathBuf::from(&args[1]),
        log_path: PathBuf::from(&args[2]),
        backup_dir: PathBuf::from(&args[3]),
        freshness: Duration::minutes(120),
    };

    let mut resolver = ChecksumResolver::new();
    run(&config, &mut resolver, &TracingNotifier)
        .with_context(|| format!("failed to aggregate batch files in '{}'", args[1]))?;

    Ok(())
}
