use crate::errors::display_user_error;
use crate::parser::{Line, parse_line};
use crate::process::fork::fork_process;
use crate::process::{Process, Redirects, wait_pid_job};
use crate::shell::Shell;
use anyhow::Result;
use msh_types::{CommandRecord, Context, MshError, Status};
use nix::unistd::Pid;
use tracing::{debug, error, warn};

pub fn eval_str(shell: &mut Shell, ctx: &Context, input: &str) -> Result<()> {
    // sampled once so a SIGTSTP mid-parse cannot split the decision
    let foreground_only = shell.jobs.foreground_only();

    let line = match parse_line(input, shell.pid, foreground_only) {
        Ok(line) => line,
        Err(err) => {
            display_user_error(ctx, &err.into());
            return Ok(());
        }
    };

    match line {
        Line::Blank => ctx.write_stdout(""),
        Line::Comment => Ok(()),
        Line::Command(record) => dispatch(shell, ctx, record),
    }
}

fn dispatch(shell: &mut Shell, ctx: &Context, record: CommandRecord) -> Result<()> {
    if let Some(builtin) = msh_builtin::get_command(record.cmd()) {
        let status = builtin(ctx, record.argv().to_vec(), shell);
        debug!("builtin {} finished with {:?}", record.cmd(), status);
        return Ok(());
    }
    launch_process(shell, ctx, &record)
}

/// Runs one external command: open redirects, fork, then either wait for the
/// child or register it as a background job.
pub(crate) fn launch_process(
    shell: &mut Shell,
    ctx: &Context,
    record: &CommandRecord,
) -> Result<()> {
    let redirects = match Redirects::prepare(record) {
        Ok(redirects) => redirects,
        Err(err) => return abandon(shell, ctx, err),
    };
    let process = match Process::new(record, &redirects) {
        Ok(process) => process,
        Err(err) => return abandon(shell, ctx, err),
    };

    let pid = match fork_process(&process) {
        Ok(pid) => pid,
        Err(err) => return abandon(shell, ctx, err),
    };
    // the child has its own copies now
    drop(redirects);

    if record.is_background() {
        track_background(shell, ctx, pid);
        return Ok(());
    }

    match wait_pid_job(pid, false) {
        Ok(Some(status)) => record_foreground(shell, ctx, status),
        Ok(None) => warn!("blocking wait on {} returned without a status", pid),
        Err(err) => {
            error!("failed to wait for {}: {}", pid, err);
            shell.jobs.set_last_status(Status::failure());
        }
    }
    Ok(())
}

/// The pid is tracked before anything is printed, so exit can always kill it.
fn track_background(shell: &mut Shell, ctx: &Context, pid: Pid) {
    shell.jobs.push_background(pid);
    if let Err(err) = ctx.write_stdout(&format!("Background process is {pid}")) {
        warn!("failed to announce background pid {}: {}", pid, err);
    }
}

fn record_foreground(shell: &mut Shell, ctx: &Context, status: Status) {
    shell.jobs.set_last_status(status);
    if let Status::Signaled(signal) = status
        && let Err(err) = ctx.write_stdout(&format!("Child terminated with signal {signal}"))
    {
        warn!("failed to report signal {}: {}", signal, err);
    }
}

fn abandon(shell: &mut Shell, ctx: &Context, err: MshError) -> Result<()> {
    warn!("abandoning command: {}", err);
    shell.jobs.set_last_status(Status::failure());
    ctx.write_stdout(&err.to_string())
}
