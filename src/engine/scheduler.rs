// src/engine/scheduler.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::engine::clock;
use crate::errors::{CrondagError, Result};
use crate::job::Job;

/// Details handed to the heartbeat hook after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat {
    /// Unix seconds observed when the tick started.
    pub observed: u64,
    /// The boundary the tick slept towards (a multiple of the delay).
    pub scheduled_call: u64,
}

pub type JobFailedHook = Box<dyn FnMut(&Job) + Send>;
pub type HeartbeatHook = Box<dyn FnMut(&Heartbeat) + Send>;

/// Cloneable handle that stops a running [`Scheduler`] loop.
///
/// The loop notices the flag at its next wake-up; a sleeping scheduler is not
/// interrupted mid-tick.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The polling scheduler.
///
/// Owns the registered jobs and runs the heartbeat loop. Job failures are
/// contained at [`Scheduler::run_job`], so a failing task can never kill the
/// loop — the failure is logged, the on-job-failed hook fires, and the next
/// tick proceeds as usual.
pub struct Scheduler {
    jobs: Vec<Job>,
    stop: Arc<AtomicBool>,
    on_job_failed: Option<JobFailedHook>,
    on_heartbeat: Option<HeartbeatHook>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            stop: Arc::new(AtomicBool::new(false)),
            on_job_failed: None,
            on_heartbeat: None,
        }
    }

    /// Register a job. Names are the identity: registering a second job with
    /// the same name fails with [`CrondagError::DuplicateJob`].
    pub fn register(&mut self, job: Job) -> Result<()> {
        if self.jobs.iter().any(|j| j.name() == job.name()) {
            return Err(CrondagError::DuplicateJob(job.name().to_string()));
        }
        debug!(job = %job.name(), "job registered");
        self.jobs.push(job);
        Ok(())
    }

    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    /// Hook invoked with the failing job whenever a run is aborted by a task
    /// failure.
    pub fn set_on_job_failed(&mut self, hook: impl FnMut(&Job) + Send + 'static) {
        self.on_job_failed = Some(Box::new(hook));
    }

    /// Hook invoked after every heartbeat tick.
    pub fn set_on_heartbeat(&mut self, hook: impl FnMut(&Heartbeat) + Send + 'static) {
        self.on_heartbeat = Some(Box::new(hook));
    }

    /// Handle for stopping the loop from outside (another task, Ctrl-C, a
    /// test hook).
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.stop))
    }

    /// The main loop. Blocks (asynchronously) until the stop flag is set.
    ///
    /// Each iteration sleeps to the next multiple of `delay_secs`, runs every
    /// due job, then invokes the heartbeat hook.
    pub async fn run(&mut self, delay_secs: u64) -> Result<()> {
        let delay = delay_secs.max(1);
        info!(delay_secs = delay, "scheduler started");

        while !self.stop.load(Ordering::SeqCst) {
            let beat = self.heartbeat(delay).await;
            if let Some(hook) = self.on_heartbeat.as_mut() {
                hook(&beat);
            }
        }

        info!("scheduler stopped");
        Ok(())
    }

    async fn heartbeat(&mut self, delay: u64) -> Heartbeat {
        let now = clock::unix_now();
        let observed = now.as_secs();
        let scheduled_call = clock::next_boundary(observed, delay);
        debug!(observed, scheduled_call, "heartbeat tick");

        let wait = Duration::from_secs(scheduled_call).saturating_sub(now);
        tokio::time::sleep(wait).await;

        self.run_pending();

        Heartbeat {
            observed,
            scheduled_call,
        }
    }

    /// Run every registered job whose schedule has elapsed.
    pub fn run_pending(&mut self) {
        let now = clock::unix_now_secs();
        let Self {
            jobs, on_job_failed, ..
        } = self;

        for job in jobs.iter_mut() {
            if job.should_run_at(now) {
                contain_run(job, on_job_failed);
            }
        }
    }

    /// Run every registered job once, ignoring cadence. Failures are
    /// contained the same way the loop contains them.
    pub fn run_once(&mut self) {
        let Self {
            jobs, on_job_failed, ..
        } = self;

        for job in jobs.iter_mut() {
            contain_run(job, on_job_failed);
        }
    }

    /// Run a single job, containing any task failure at this boundary.
    ///
    /// This never propagates the failure: the heartbeat loop must stay alive
    /// whatever the job does.
    pub fn run_job(&mut self, job: &mut Job) {
        contain_run(job, &mut self.on_job_failed);
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn contain_run(job: &mut Job, on_job_failed: &mut Option<JobFailedHook>) {
    match job.run() {
        Ok(()) => {}
        Err(err @ CrondagError::TaskFailed { .. }) => {
            error!(job = %job.name(), error = %err, "job stream interrupted");
            if let Some(hook) = on_job_failed.as_mut() {
                hook(job);
            }
        }
        Err(err) => {
            // Job::run only surfaces task failures today; anything else is
            // still contained to keep the loop alive.
            error!(job = %job.name(), error = %err, "unexpected job error");
        }
    }
}
