use anyhow::{Context as _, Result};
use clap::Parser;
use mini_shell::environment::{LOG_ENV, LOG_FILE_NAME, get_state_file};
use mini_shell::errors::display_user_error;
use mini_shell::repl::Repl;
use mini_shell::shell::{Shell, ShellConfig};
use msh_types::{Context, Status};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run a single command line, then exit with its status
    #[arg(short, long)]
    command: Option<String>,

    /// Log file, defaults to $XDG_STATE_HOME/msh/msh.log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not print the ": " prompt before each line
    #[arg(long)]
    no_prompt: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.log_file.as_deref()) {
        eprintln!("Failed to initialize tracing: {err:?}");
        return ExitCode::FAILURE;
    }

    let mut shell = Shell::new(ShellConfig {
        interactive: !cli.no_prompt,
        ..ShellConfig::default()
    });
    let ctx = Context::new(shell.pid);
    if let Err(err) = shell.set_signals() {
        display_user_error(&ctx, &err);
        return ExitCode::FAILURE;
    }
    info!("msh started, pid {}", shell.pid);

    let code = match cli.command.as_deref() {
        Some(command) => execute_command(&mut shell, &ctx, command),
        None => run_interactive(&mut shell, ctx),
    };
    info!("msh has shut down");
    code
}

fn init_tracing(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => get_state_file(LOG_FILE_NAME)?,
    };
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_writer(Arc::new(log_file))
        .init();
    Ok(())
}

fn execute_command(shell: &mut Shell, ctx: &Context, command: &str) -> ExitCode {
    debug!("run command mode {:?}", command);
    if let Err(err) = shell.eval_str(ctx, command) {
        display_user_error(ctx, &err);
        return ExitCode::FAILURE;
    }
    if let Err(err) = shell.check_job_state(ctx) {
        display_user_error(ctx, &err);
    }
    let status = shell.last_status();
    shell.exit();
    exit_code(status)
}

fn run_interactive(shell: &mut Shell, ctx: Context) -> ExitCode {
    let stdin = io::stdin();
    let mut repl = Repl::new(shell, ctx.clone());
    match repl.run(stdin.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            display_user_error(&ctx, &err);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(status: Status) -> ExitCode {
    match status {
        Status::Exited(code) => ExitCode::from((code & 0xff) as u8),
        Status::Signaled(signal) => ExitCode::from((128 + signal) as u8),
    }
}
