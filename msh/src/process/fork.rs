use libc::STDOUT_FILENO;
use msh_types::{MshError, MshResult};
use nix::unistd::{ForkResult, Pid, fork, getpid, write};
use std::io::Write;
use tracing::{debug, error, warn};

use super::process::Process;
use super::signal;

/// Forks and execs `process`, returning the child's pid to the parent.
///
/// SIGTSTP is ignored across the fork so the child inherits "ignored"; the
/// parent re-arms the toggling handler as soon as fork returns.
pub(crate) fn fork_process(process: &Process) -> MshResult<Pid> {
    debug!(
        "🍴 FORK: about to fork {:?} foreground:{}",
        process.cmd, process.foreground
    );
    std::io::stdout().flush().ok();

    if let Err(e) = signal::ignore_sigtstp() {
        warn!("🍴 FORK: failed to ignore SIGTSTP: {}", e);
    }

    let result = unsafe { fork() };

    match result {
        Ok(ForkResult::Parent { child }) => {
            rearm_sigtstp();
            debug!("🍴 FORK: parent continuing, child pid: {}", child);
            Ok(child)
        }
        Ok(ForkResult::Child) => {
            debug!("🍴 FORK: child {} launching", getpid());
            if let Err(err) = process.launch() {
                // stdout may already be the redirect target
                let _ = write(STDOUT_FILENO, format!("{err}\n").as_bytes());
            }
            std::process::exit(1);
        }
        Err(errno) => {
            rearm_sigtstp();
            error!("🍴 FORK: fork failed: {}", errno);
            Err(MshError::Fork(errno))
        }
    }
}

fn rearm_sigtstp() {
    if let Err(e) = signal::arm_sigtstp() {
        error!("🍴 FORK: failed to re-arm SIGTSTP handler: {}", e);
    }
}
