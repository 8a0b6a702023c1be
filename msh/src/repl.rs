use crate::errors::display_user_error;
use crate::shell::Shell;
use anyhow::{Context as _, Result};
use msh_types::Context;
use std::io::BufRead;
use tracing::debug;

pub const PROMPT: &str = ": ";

/// Prompt/read/dispatch/reap loop over any line source.
pub struct Repl<'a> {
    pub shell: &'a mut Shell,
    ctx: Context,
}

impl<'a> Repl<'a> {
    pub fn new(shell: &'a mut Shell, ctx: Context) -> Self {
        Repl { shell, ctx }
    }

    fn print_prompt(&self) -> Result<()> {
        if !self.shell.config.interactive {
            return Ok(());
        }
        self.ctx.write_prompt(PROMPT)
    }

    fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("failed to read line")?;
        if read == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    /// Runs until `exit` or end of input. End of input behaves like `exit`.
    pub fn run<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        loop {
            self.print_prompt()?;

            let Some(line) = Self::read_line(&mut reader)? else {
                debug!("EOF on input, exiting");
                break;
            };

            if let Err(err) = self.shell.eval_str(&self.ctx, &line) {
                display_user_error(&self.ctx, &err);
            }
            if self.shell.is_exited() {
                break;
            }

            if let Err(err) = self.shell.check_job_state(&self.ctx) {
                display_user_error(&self.ctx, &err);
            }
        }
        self.shell.exit();
        Ok(())
    }
}
