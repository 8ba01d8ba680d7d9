// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod job;
pub mod logging;

use std::path::PathBuf;
use std::str::FromStr;

use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::Scheduler;
use crate::errors::Result;
use crate::exec::command_work;
use crate::job::schedule::{Schedule, TimeUnit, parse_offset};
use crate::job::{Job, Task};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - job assembly (tasks, dependency edges, cadence)
/// - scheduler registration
/// - Ctrl-C handling
/// - the heartbeat loop
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let mut scheduler = Scheduler::new();
    for job in build_jobs(&cfg)? {
        scheduler.register(job)?;
    }

    if args.once {
        info!("--once: running every job's DAG a single time");
        scheduler.run_once();
        return Ok(());
    }

    // Ctrl-C → graceful shutdown at the next heartbeat.
    {
        let stop = scheduler.stop_handle();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            info!("Ctrl-C received, stopping scheduler");
            stop.stop();
        });
    }

    scheduler.run(cfg.scheduler.heartbeat_secs).await
}

/// Assemble runnable [`Job`]s from a validated configuration.
///
/// Each config task becomes a [`Task`] whose work runs the configured shell
/// command; `after` lists become upstream edges.
pub fn build_jobs(cfg: &ConfigFile) -> Result<Vec<Job>> {
    let mut jobs = Vec::with_capacity(cfg.job.len());

    for (name, jc) in cfg.job.iter() {
        let mut job = Job::new(name);

        for (task_id, tc) in jc.task.iter() {
            job.add_task(Task::new(task_id, command_work(task_id, &tc.cmd)))?;
        }
        for (task_id, tc) in jc.task.iter() {
            for dep in tc.after.iter() {
                job.set_upstream(task_id, dep)?;
            }
        }

        let unit = TimeUnit::from_str(&jc.unit)?;
        let mut schedule = Schedule::new(jc.every, unit);
        if let Some(at) = &jc.at {
            schedule = schedule.with_offset_secs(parse_offset(at)?)?;
        }
        job.set_schedule(schedule);

        jobs.push(job);
    }

    Ok(jobs)
}

/// Simple dry-run output: print jobs, cadences, tasks and deps.
fn print_dry_run(cfg: &ConfigFile) {
    println!("crondag dry-run");
    println!("  scheduler.heartbeat_secs = {}", cfg.scheduler.heartbeat_secs);
    println!();

    println!("jobs ({}):", cfg.job.len());
    for (name, jc) in cfg.job.iter() {
        println!("  - {name}");
        println!("      every: {} {}", jc.every, jc.unit);
        if let Some(ref at) = jc.at {
            println!("      at: {at}");
        }
        println!("      tasks ({}):", jc.task.len());
        for (task_id, tc) in jc.task.iter() {
            println!("        - {task_id}");
            println!("            cmd: {}", tc.cmd);
            if !tc.after.is_empty() {
                println!("            after: {:?}", tc.after);
            }
        }
    }
}
