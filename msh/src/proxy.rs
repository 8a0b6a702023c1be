use crate::shell::Shell;
use anyhow::Result;
use msh_builtin::ShellProxy;
use msh_types::Status;
use tracing::debug;

impl ShellProxy for Shell {
    fn exit_shell(&mut self) {
        self.exit();
    }

    fn changepwd(&mut self, path: &str) -> Result<()> {
        std::env::set_current_dir(path)?;
        debug!("changed directory to {}", path);
        Ok(())
    }

    fn last_status(&self) -> Status {
        self.jobs.last_status()
    }
}
