use crate::shell::APP_NAME;
use anyhow::{Context as _, Result};
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "msh.log";
/// Environment variable holding the tracing filter, e.g. `MSH_LOG=debug`.
pub const LOG_ENV: &str = "MSH_LOG";

/// Get the path to a state file (e.g. logs).
pub fn get_state_file(name: &str) -> Result<PathBuf> {
    let xdg_dir =
        xdg::BaseDirectories::with_prefix(APP_NAME).context("failed get xdg directory")?;
    xdg_dir.place_state_file(name).context("failed get path")
}
