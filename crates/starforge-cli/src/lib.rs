//! Batch orchestration for the `starforge` binary: planning jobs from config
//! and flags, rendering them on a worker pool, and caching the sheets on disk.

pub mod cache;
pub mod plan;
pub mod pool;

use starforge_config::{CliArgs, Config};
use tracing::{error, info, warn};

pub use cache::{CacheError, Manifest, ManifestEntry, SpriteCache};
pub use plan::{BatchPlan, SpriteJob};
pub use pool::{JobOutcome, WorkerPool};

/// Counts reported at the end of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub generated: usize,
    pub cached: usize,
    pub failed: usize,
    pub rejected: usize,
}

/// Plan, render and store one batch. Per-sprite failures are logged and
/// counted; only a failure to start the worker pool aborts the run.
pub fn run_batch(config: &Config, args: &CliArgs) -> std::io::Result<BatchSummary> {
    let plan = BatchPlan::from_args(config, args);
    for rejected in &plan.rejected {
        error!(error = %rejected, "skipping invalid request");
    }

    let mut cache = SpriteCache::open(&config.output.directory, &config.output.manifest_file)
        .unwrap_or_else(|e| {
            error!(error = %e, "manifest unreadable, starting a new one");
            SpriteCache::fresh(&config.output.directory, &config.output.manifest_file)
        });

    let (cached, pending): (Vec<SpriteJob>, Vec<SpriteJob>) = plan
        .jobs
        .into_iter()
        .partition(|job| !args.force && cache.contains(&job.key));

    let mut summary = BatchSummary {
        cached: cached.len(),
        rejected: plan.rejected.len(),
        ..BatchSummary::default()
    };

    let pool = WorkerPool::from_config(config.batch.jobs);
    info!(
        pending = pending.len(),
        cached = summary.cached,
        threads = pool.threads(),
        out = %cache.root().display(),
        "starting batch"
    );

    for outcome in pool.run(pending)?.iter() {
        let sheet = match outcome.result {
            Ok(sheet) => sheet,
            Err(e) => {
                error!(key = %outcome.key, error = %e, "generation failed");
                summary.failed += 1;
                continue;
            }
        };
        match cache.store(&outcome.key, &sheet) {
            Ok(entry) => {
                info!(
                    key = %outcome.key,
                    file = %entry.file,
                    elapsed_ms = outcome.elapsed.as_millis() as u64,
                    "sprite ready"
                );
                summary.generated += 1;
            }
            Err(e) => {
                error!(key = %outcome.key, error = %e, "sprite unavailable");
                summary.failed += 1;
            }
        }
    }

    if let Err(e) = cache.save_manifest() {
        error!(error = %e, "manifest not saved");
    }
    if summary.failed > 0 {
        warn!(failed = summary.failed, "some sprites were not generated");
    }
    Ok(summary)
}
