use super::ShellProxy;
use msh_types::{Context, Status};
use tracing::error;

pub fn command(ctx: &Context, _argv: Vec<String>, proxy: &mut dyn ShellProxy) -> Status {
    let last = proxy.last_status();
    if let Err(err) = ctx.write_stdout(&last.to_string()) {
        error!("status: failed to write: {}", err);
        return Status::failure();
    }
    Status::success()
}
