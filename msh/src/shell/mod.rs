pub mod eval;
pub mod job;

use crate::process::{JobTable, signal};
use anyhow::Result;
use msh_types::{Context, Status};
use nix::unistd::{Pid, getpid};
use tracing::{debug, info};

pub const APP_NAME: &str = "msh";

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone)]
pub struct ShellConfig {
    /// Print the prompt before each read.
    pub interactive: bool,
    /// When a background job is reaped, its status also becomes the value
    /// `status` reports.
    pub background_updates_status: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            interactive: true,
            background_updates_status: true,
        }
    }
}

pub struct Shell {
    pub pid: Pid,
    pub config: ShellConfig,
    pub(crate) jobs: JobTable,
    pub(crate) exited: bool,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("pid", &self.pid)
            .field("jobs", &self.jobs)
            .field("exited", &self.exited)
            .finish()
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.kill_wait_jobs();
    }
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Shell {
            pid: getpid(),
            config,
            jobs: JobTable::new(signal::foreground_only_flag()),
            exited: false,
        }
    }

    /// Installs the shell's own SIGINT/SIGTSTP dispositions.
    pub fn set_signals(&mut self) -> Result<()> {
        signal::install_shell_handlers()?;
        debug!("Signal handlers setup completed");
        Ok(())
    }

    pub fn eval_str(&mut self, ctx: &Context, input: &str) -> Result<()> {
        eval::eval_str(self, ctx, input)
    }

    /// Reaps finished background jobs, reporting each one on `ctx`.
    pub fn check_job_state(&mut self, ctx: &Context) -> Result<Vec<(Pid, Status)>> {
        job::check_job_state(self, ctx)
    }

    pub fn kill_wait_jobs(&mut self) {
        job::kill_wait_jobs(self)
    }

    pub fn exit(&mut self) {
        if self.exited {
            return;
        }
        info!(
            "shell exiting, {} background job(s) to kill",
            self.jobs.background_pids().len()
        );
        self.kill_wait_jobs();
        self.exited = true;
    }

    pub fn is_exited(&self) -> bool {
        self.exited
    }

    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub fn last_status(&self) -> Status {
        self.jobs.last_status()
    }
}
