use msh_types::{CommandRecord, MshError, MshResult};
use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, RawFd};
use tracing::debug;

/// Where background commands read from and write to when no redirect was given.
pub const NULL_DEVICE: &str = "/dev/null";

const OUTPUT_MODE: u32 = 0o644;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    Input(String),
    Output(String),
}

impl Redirect {
    pub(crate) fn open(&self) -> MshResult<File> {
        match self {
            Redirect::Input(path) => File::open(path).map_err(|source| MshError::Redirect {
                path: path.clone(),
                direction: "input",
                source,
            }),
            Redirect::Output(path) => OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(OUTPUT_MODE)
                .open(path)
                .map_err(|source| MshError::Redirect {
                    path: path.clone(),
                    direction: "output",
                    source,
                }),
        }
    }
}

/// Files opened in the shell for one command.
///
/// The child dup2s them onto stdin/stdout; the parent closes its copies by
/// dropping this value once the fork is done.
#[derive(Debug, Default)]
pub struct Redirects {
    pub(crate) stdin: Option<File>,
    pub(crate) stdout: Option<File>,
}

impl Redirects {
    pub fn prepare(record: &CommandRecord) -> MshResult<Self> {
        let background = record.is_background();

        let input = match record.infile() {
            Some(path) => Some(Redirect::Input(path.to_string())),
            None if background => Some(Redirect::Input(NULL_DEVICE.to_string())),
            None => None,
        };
        let output = match record.outfile() {
            Some(path) => Some(Redirect::Output(path.to_string())),
            None if background => Some(Redirect::Output(NULL_DEVICE.to_string())),
            None => None,
        };
        debug!("redirects for {}: in={:?} out={:?}", record.cmd(), input, output);

        let stdin = input.map(|r| r.open()).transpose()?;
        let stdout = output.map(|r| r.open()).transpose()?;
        Ok(Redirects { stdin, stdout })
    }

    pub fn stdin_fd(&self) -> Option<RawFd> {
        self.stdin.as_ref().map(|f| f.as_raw_fd())
    }

    pub fn stdout_fd(&self) -> Option<RawFd> {
        self.stdout.as_ref().map(|f| f.as_raw_fd())
    }
}
