use msh_types::Context;
use tracing::{debug, warn};

/// Display error in a user-friendly format without stack traces.
pub fn display_user_error(ctx: &Context, err: &anyhow::Error) {
    debug!("user error: {:?}", err);
    if let Err(write_err) = ctx.write_stderr(&format!("msh: {}", err)) {
        warn!("failed to report {:?}: {}", err, write_err);
    }
}
