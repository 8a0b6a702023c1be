use anyhow::Result;
use libc::{STDERR_FILENO, STDOUT_FILENO};
use nix::unistd::Pid;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::mem;
use std::os::unix::io::{FromRawFd, RawFd};
use thiserror::Error;

pub mod command;
pub use command::CommandRecord;

/// msh specific error types
#[derive(Error, Debug)]
pub enum MshError {
    #[error("Cannot open {path} for {direction}.")]
    Redirect {
        path: String,
        direction: &'static str,
        source: std::io::Error,
    },

    #[error("Cannot redirect {direction}.")]
    Dup {
        direction: &'static str,
        source: nix::errno::Errno,
    },

    #[error("fork() failed.")]
    Fork(#[source] nix::errno::Errno),

    #[error("Command not found.")]
    Exec(#[source] nix::errno::Errno),

    #[error("syntax error: {0}")]
    Parse(String),

    #[error("System call failed: {0}")]
    System(#[from] nix::errno::Errno),
}

pub type MshResult<T> = std::result::Result<T, MshError>;

/// How the most recently completed command finished.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Status {
    Exited(i32),
    Signaled(i32),
}

impl Default for Status {
    fn default() -> Self {
        Status::Exited(0)
    }
}

impl Status {
    pub fn success() -> Self {
        Status::Exited(0)
    }

    pub fn failure() -> Self {
        Status::Exited(1)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Exited(0))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Exited(code) => write!(f, "exit value {code}"),
            Status::Signaled(signal) => write!(f, "terminated by signal {signal}"),
        }
    }
}

/// Per-dispatch execution context handed to builtins and the executor.
#[derive(Debug, Clone)]
pub struct Context {
    pub shell_pid: Pid,
    pub outfile: RawFd,
    pub errfile: RawFd,
}

impl Context {
    pub fn new(shell_pid: Pid) -> Self {
        Context {
            shell_pid,
            outfile: STDOUT_FILENO,
            errfile: STDERR_FILENO,
        }
    }

    pub fn write_stdout(&self, msg: &str) -> Result<()> {
        let mut file = unsafe { File::from_raw_fd(self.outfile) };
        let written = writeln!(&mut file, "{msg}").and_then(|_| file.flush());
        // the fd is borrowed, never close it
        mem::forget(file);
        Ok(written?)
    }

    /// Like `write_stdout` but without the trailing newline.
    pub fn write_prompt(&self, prompt: &str) -> Result<()> {
        let mut file = unsafe { File::from_raw_fd(self.outfile) };
        let written = file.write_all(prompt.as_bytes()).and_then(|_| file.flush());
        mem::forget(file);
        Ok(written?)
    }

    pub fn write_stderr(&self, msg: &str) -> Result<()> {
        let mut file = unsafe { File::from_raw_fd(self.errfile) };
        let written = writeln!(&mut file, "{msg}");
        mem::forget(file);
        Ok(written?)
    }
}
