//! Fixed-size thread pool that renders sprite jobs in parallel.
//!
//! Jobs are fed through a bounded channel by a feeder thread; each worker
//! renders one sheet at a time and sends the outcome back. The result
//! receiver drains once every worker has exited.

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, bounded};
use starforge_sprite::{SpriteError, SpriteSheet};
use tracing::{debug, info_span};

use crate::plan::SpriteJob;

/// A finished job, successful or not.
#[derive(Debug)]
pub struct JobOutcome {
    pub key: String,
    pub result: Result<SpriteSheet, SpriteError>,
    pub elapsed: Duration,
}

/// Renders jobs across `threads` workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerPool {
    threads: usize,
    queue_capacity: usize,
}

impl WorkerPool {
    pub fn new(threads: usize) -> Self {
        let threads = threads.max(1);
        Self {
            threads,
            queue_capacity: threads * 2,
        }
    }

    /// Pool sized from the config's `jobs` setting (0 = one per logical CPU).
    pub fn from_config(jobs: usize) -> Self {
        if jobs == 0 {
            Self::new(num_cpus::get())
        } else {
            Self::new(jobs)
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Start rendering `jobs`. Outcomes arrive in completion order.
    pub fn run(&self, jobs: Vec<SpriteJob>) -> std::io::Result<Receiver<JobOutcome>> {
        let (job_sender, job_receiver) = bounded::<SpriteJob>(self.queue_capacity);
        let (result_sender, result_receiver) = bounded::<JobOutcome>(self.queue_capacity);

        for index in 0..self.threads {
            let receiver = job_receiver.clone();
            let sender = result_sender.clone();
            std::thread::Builder::new()
                .name(format!("sprite-worker-{index}"))
                .spawn(move || {
                    while let Ok(job) = receiver.recv() {
                        let outcome = render(job);
                        if sender.send(outcome).is_err() {
                            break;
                        }
                    }
                })?;
        }
        drop(result_sender);

        std::thread::Builder::new()
            .name("sprite-feeder".into())
            .spawn(move || {
                for job in jobs {
                    if job_sender.send(job).is_err() {
                        break;
                    }
                }
            })?;

        Ok(result_receiver)
    }
}

/// Render one job on the current thread.
pub fn render(job: SpriteJob) -> JobOutcome {
    let _span = info_span!("sprite", key = %job.key).entered();
    let start = Instant::now();
    let result = starforge_sprite::generate(&job.spec);
    let elapsed = start.elapsed();
    debug!(elapsed_ms = elapsed.as_millis() as u64, ok = result.is_ok(), "job finished");
    JobOutcome {
        key: job.key,
        result,
        elapsed,
    }
}
