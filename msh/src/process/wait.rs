use msh_types::{MshError, MshResult, Status};
use nix::errno::Errno;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use tracing::{debug, error};

/// Waits on one child.
///
/// With `no_hang` the call returns `Ok(None)` while the child is still
/// running. Without it, the call blocks until the child terminates; EINTR from
/// the SIGTSTP handler is retried.
pub fn wait_pid_job(pid: Pid, no_hang: bool) -> MshResult<Option<Status>> {
    let options = if no_hang {
        Some(WaitPidFlag::WNOHANG)
    } else {
        None
    };

    loop {
        let result = waitpid(pid, options);
        let status = match result {
            Ok(WaitStatus::Exited(pid, code)) => {
                debug!("WAIT_PID_EXITED: {} exited with status {}", pid, code);
                Status::Exited(code)
            }
            Ok(WaitStatus::Signaled(pid, signal, core_dumped)) => {
                debug!(
                    "WAIT_PID_SIGNALED: {} killed by {:?}, core_dumped: {}",
                    pid, signal, core_dumped
                );
                Status::Signaled(signal as i32)
            }
            Ok(WaitStatus::StillAlive) => {
                debug!("WAIT_PID_ALIVE: {} still alive", pid);
                return Ok(None);
            }
            Err(Errno::EINTR) => {
                debug!("WAIT_PID_EINTR: retrying waitpid for {}", pid);
                continue;
            }
            Err(errno) => {
                debug!("WAIT_PID_ERROR: waitpid for {} failed: {}", pid, errno);
                return Err(MshError::System(errno));
            }
            Ok(other) => {
                error!("WAIT_PID_UNEXPECTED: status for {}: {:?}", pid, other);
                if no_hang {
                    return Ok(None);
                }
                continue;
            }
        };
        return Ok(Some(status));
    }
}
