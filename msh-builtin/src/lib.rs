use anyhow::Result;
use msh_types::{Context, Status};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

// Builtin command modules
pub mod cd;
mod status;

/// Interface builtins use to reach into the shell that runs them.
pub trait ShellProxy {
    /// Initiates shell exit process
    fn exit_shell(&mut self);

    /// Changes the current working directory of the shell process
    fn changepwd(&mut self, path: &str) -> Result<()>;

    /// Status of the most recently completed command
    fn last_status(&self) -> Status;
}

/// Signature shared by every builtin.
///
/// The returned status is informational only: builtins never overwrite the
/// shell's last status.
pub type BuiltinCommand =
    fn(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> Status;

pub static BUILTIN_COMMAND: Lazy<HashMap<&'static str, BuiltinCommand>> = Lazy::new(|| {
    let mut builtin = HashMap::new();
    builtin.insert("exit", exit as BuiltinCommand);
    builtin.insert("cd", cd::command as BuiltinCommand);
    builtin.insert("status", status::command as BuiltinCommand);
    builtin
});

/// Retrieves a builtin command function by name
pub fn get_command(name: &str) -> Option<BuiltinCommand> {
    BUILTIN_COMMAND.get(name).copied()
}

pub fn exit(_ctx: &Context, _argv: Vec<String>, proxy: &mut dyn ShellProxy) -> Status {
    debug!("exit command called");
    proxy.exit_shell();
    Status::success()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::io::{Read, Seek, SeekFrom};
    use std::os::unix::io::AsRawFd;
    use std::path::Path;

    #[derive(Default)]
    pub struct MockProxy {
        pub exited: bool,
        pub pwd: Option<String>,
        pub status: Status,
    }

    impl ShellProxy for MockProxy {
        fn exit_shell(&mut self) {
            self.exited = true;
        }

        fn changepwd(&mut self, path: &str) -> Result<()> {
            if !Path::new(path).is_dir() {
                anyhow::bail!("No such file or directory");
            }
            self.pwd = Some(path.to_string());
            Ok(())
        }

        fn last_status(&self) -> Status {
            self.status
        }
    }

    /// Runs a builtin with stdout captured in a temp file.
    pub fn run(builtin: BuiltinCommand, argv: &[&str], proxy: &mut MockProxy) -> (Status, String) {
        let mut out = tempfile::tempfile().unwrap();
        let mut ctx = Context::new(nix::unistd::getpid());
        ctx.outfile = out.as_raw_fd();

        let argv = argv.iter().map(|a| a.to_string()).collect();
        let status = builtin(&ctx, argv, proxy);

        out.seek(SeekFrom::Start(0)).unwrap();
        let mut written = String::new();
        out.read_to_string(&mut written).unwrap();
        (status, written)
    }
}
