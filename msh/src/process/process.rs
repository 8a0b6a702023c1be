use libc::{STDIN_FILENO, STDOUT_FILENO};
use msh_types::{CommandRecord, MshError, MshResult};
use nix::unistd::{dup2, execvp};
use std::ffi::CString;
use std::os::unix::io::RawFd;
use tracing::{debug, error};

use super::redirect::Redirects;
use super::signal;

/// Everything the child needs to replace its image, prepared before fork so
/// the child side only makes system calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub(crate) cmd: CString,
    pub(crate) argv: Vec<CString>,
    pub(crate) stdin: Option<RawFd>,
    pub(crate) stdout: Option<RawFd>,
    pub(crate) foreground: bool,
}

impl Process {
    pub fn new(record: &CommandRecord, redirects: &Redirects) -> MshResult<Self> {
        let cmd = to_cstring(record.cmd())?;
        let argv = record
            .argv()
            .iter()
            .map(|a| to_cstring(a))
            .collect::<MshResult<Vec<_>>>()?;

        Ok(Process {
            cmd,
            argv,
            stdin: redirects.stdin_fd(),
            stdout: redirects.stdout_fd(),
            foreground: !record.is_background(),
        })
    }

    /// Child side: wire signals and descriptors, then exec.
    ///
    /// Only returns if something went wrong.
    pub fn launch(&self) -> MshResult<()> {
        if let Err(e) = signal::reset_child_signals(self.foreground) {
            error!("failed to reset signals in child: {}", e);
        }

        if let Some(fd) = self.stdin {
            dup2(fd, STDIN_FILENO).map_err(|source| MshError::Dup {
                direction: "input",
                source,
            })?;
        }
        if let Some(fd) = self.stdout {
            dup2(fd, STDOUT_FILENO).map_err(|source| MshError::Dup {
                direction: "output",
                source,
            })?;
        }

        debug!(
            "launch: execvp cmd:{:?} argv:{:?} foreground:{} stdin:{:?} stdout:{:?}",
            self.cmd, self.argv, self.foreground, self.stdin, self.stdout
        );
        match execvp(&self.cmd, &self.argv) {
            Ok(_) => Ok(()),
            Err(err) => {
                error!("failed to exec {:?}: {}", self.cmd, err);
                Err(MshError::Exec(err))
            }
        }
    }
}

fn to_cstring(s: &str) -> MshResult<CString> {
    CString::new(s).map_err(|_| MshError::Parse(format!("NUL byte in {:?}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argv_is_prepared_before_fork() {
        let record = CommandRecord::new("echo".to_string())
            .with_arg("hello".to_string())
            .with_arg("world".to_string());
        let process = Process::new(&record, &Redirects::default()).unwrap();

        assert_eq!(process.cmd.to_str().unwrap(), "echo");
        assert_eq!(process.argv.len(), 3);
        assert_eq!(process.argv[0], process.cmd);
        assert!(process.foreground);
        assert_eq!(process.stdin, None);
        assert_eq!(process.stdout, None);
    }

    #[test]
    fn background_processes_are_not_foreground() {
        let record = CommandRecord::new("sleep".to_string()).with_background(true);
        let process = Process::new(&record, &Redirects::default()).unwrap();
        assert!(!process.foreground);
    }

    #[test]
    fn nul_bytes_are_rejected() {
        let record = CommandRecord::new("ec\0ho".to_string());
        assert!(Process::new(&record, &Redirects::default()).is_err());
    }
}
