pub mod aggregator;
pub mod error;
pub mod factory;
pub mod identity_store;
pub mod models;
pub mod notify;
pub mod parser;
pub mod processed_log;
pub mod resolver;
pub mod rewriter;
pub mod selection;

use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDate};
use tracing::{error, info};

use error::Result;
use factory::PaymentFactory;
use notify::Notifier;
use processed_log::ProcessedFileLog;
use resolver::IdentityResolver;
use rewriter::Rewriter;

/// Run-level configuration, passed explicitly so a run is reproducible
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory scanned for bpy331_*.dat files
    pub data_dir: PathBuf,
    /// Append-only log of already-rewritten file names
    pub log_path: PathBuf,
    /// Directory receiving pre-rewrite backup copies
    pub backup_dir: PathBuf,
    /// How recently a file must have been modified to be eligible
    pub freshness: Duration,
}

/// Outcome of aggregating one file
#[derive(Debug)]
pub struct RunSummary {
    pub path: PathBuf,
    pub total: usize,
    pub aggregated: usize,
}

/// Parse, resolve, aggregate, and rewrite one batch file.
///
/// Stages run strictly in sequence over the whole batch; any error aborts
/// the remaining stages and leaves the source file untouched.
pub fn process_file(
    path: &Path,
    run_date: NaiveDate,
    resolver: &mut dyn IdentityResolver,
    rewriter: &Rewriter,
) -> Result<RunSummary> {
    let text = std::fs::read_to_string(path)?;
    let lines: Vec<String> = text.lines().map(str::to_owned).collect();

    let factory = PaymentFactory::new(run_date);
    let mut payments: Vec<_> = parser::records(path, &lines)?
        .map(|record| factory.from_record(&record))
        .collect();
    let header = &lines[0];

    resolver::apply_identities(&mut payments, resolver)?;

    let total = payments.len();
    let aggregates = aggregator::aggregate(payments)?;
    rewriter.rewrite(path, header, &aggregates)?;

    Ok(RunSummary {
        path: path.to_path_buf(),
        total,
        aggregated: aggregates.len(),
    })
}

/// One full batch run: select eligible files, aggregate each in turn,
/// and notify on every success.
///
/// With no eligible file the run terminates without rewriting anything,
/// leaving a timestamp marker in the log. A failure on one file stops the
/// run; files are processed strictly one at a time.
pub fn run(
    config: &BatchConfig,
    resolver: &mut dyn IdentityResolver,
    notifier: &dyn Notifier,
) -> Result<Vec<RunSummary>> {
    let log = ProcessedFileLog::new(&config.log_path);
    let candidates = selection::gather_new_files(&config.data_dir, &log, config.freshness)?;
    if candidates.is_empty() {
        info!(checked_at = %Local::now().format("%Y-%m-%d %H:%M:%S"), "no eligible input files");
        return Ok(Vec::new());
    }

    let run_date = Local::now().date_naive();
    let rewriter = Rewriter::new(&config.backup_dir, ProcessedFileLog::new(&config.log_path));

    let mut summaries = Vec::with_capacity(candidates.len());
    for path in candidates {
        let summary = match process_file(&path, run_date, resolver, &rewriter) {
            Ok(summary) => summary,
            Err(e) => {
                error!(file = %path.display(), error = %e, "aggregation run aborted");
                return Err(e);
            }
        };
        notifier.notify(
            "BPY331 aggregation complete",
            &format!(
                "Aggregated {}/{} payments in {}",
                summary.aggregated,
                summary.total,
                summary.path.display()
            ),
        )?;
        summaries.push(summary);
    }
    Ok(summaries)
}
