use crate::process::signal::send_signal;
use crate::process::wait_pid_job;
use crate::shell::Shell;
use anyhow::Result;
use msh_types::{Context, MshError, Status};
use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::unistd::Pid;
use tracing::{debug, error, warn};

/// Polls every background pid once without blocking, in the order the jobs
/// were started, and reports the ones that have finished.
pub fn check_job_state(shell: &mut Shell, ctx: &Context) -> Result<Vec<(Pid, Status)>> {
    // Fast path: no jobs to check
    if !shell.jobs.has_jobs() {
        return Ok(Vec::new());
    }

    let mut completed = Vec::new();
    for pid in shell.jobs.background_pids().to_vec() {
        let status = match wait_pid_job(pid, true) {
            Ok(Some(status)) => status,
            Ok(None) => continue,
            Err(MshError::System(Errno::ECHILD)) => {
                warn!("CHECK_JOB_STATE: {} is no longer our child, dropping it", pid);
                shell.jobs.remove(pid);
                continue;
            }
            Err(err) => {
                error!("CHECK_JOB_STATE: failed to poll {}: {}", pid, err);
                continue;
            }
        };

        shell.jobs.remove(pid);
        let message = match status {
            Status::Signaled(signal) => format!("Process {pid} terminated with signal {signal}"),
            Status::Exited(code) => format!("Process {pid} ended with status {code}"),
        };
        if shell.config.background_updates_status {
            shell.jobs.set_last_status(status);
        }
        completed.push((pid, status));
        if let Err(err) = ctx.write_stdout(&message) {
            warn!("CHECK_JOB_STATE: failed to report {}: {}", pid, err);
        }
    }

    debug!(
        "CHECK_JOB_STATE: {} job(s) completed, {} remaining",
        completed.len(),
        shell.jobs.background_pids().len()
    );
    Ok(completed)
}

/// SIGKILLs every tracked background pid and reaps it.
pub fn kill_wait_jobs(shell: &mut Shell) {
    for pid in shell.jobs.take_background_pids() {
        if let Err(e) = send_signal(pid, Signal::SIGKILL) {
            debug!("KILL: {} already gone: {}", pid, e);
        }
        if let Err(e) = wait_pid_job(pid, false) {
            debug!("KILL: could not reap {}: {}", pid, e);
        }
    }
}
