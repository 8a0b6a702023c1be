use anyhow::{Context as _, Result};
use libc::STDOUT_FILENO;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, kill, sigaction};
use nix::unistd::{Pid, write};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error};

static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);

const ENTER_FOREGROUND_ONLY: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
const EXIT_FOREGROUND_ONLY: &[u8] = b"\nExiting foreground-only mode\n";

/// The process-wide foreground-only flag flipped by SIGTSTP.
pub fn foreground_only_flag() -> &'static AtomicBool {
    &FOREGROUND_ONLY
}

// Runs in signal context: only the atomic and a raw write(2).
extern "C" fn handle_sigtstp(_: i32) {
    let was_on = FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
    let message = if was_on {
        EXIT_FOREGROUND_ONLY
    } else {
        ENTER_FOREGROUND_ONLY
    };
    let _ = write(STDOUT_FILENO, message);
}

fn set_action(signal: Signal, handler: SigHandler, flags: SaFlags) -> Result<()> {
    let action = SigAction::new(handler, flags, SigSet::all());
    unsafe {
        sigaction(signal, &action)
            .with_context(|| format!("failed to set {:?} handler", signal))?;
    }
    Ok(())
}

/// Dispositions for the shell process itself: SIGINT ignored, SIGTSTP toggles
/// foreground-only mode.
pub(crate) fn install_shell_handlers() -> Result<()> {
    set_action(Signal::SIGINT, SigHandler::SigIgn, SaFlags::empty())?;
    arm_sigtstp()?;
    debug!("SIGNAL: shell handlers installed");
    Ok(())
}

pub(crate) fn arm_sigtstp() -> Result<()> {
    set_action(
        Signal::SIGTSTP,
        SigHandler::Handler(handle_sigtstp),
        SaFlags::SA_RESTART,
    )
}

/// Used around fork so the child never inherits the toggling handler.
pub(crate) fn ignore_sigtstp() -> Result<()> {
    set_action(Signal::SIGTSTP, SigHandler::SigIgn, SaFlags::SA_RESTART)
}

/// Child side, right before exec. SIGPIPE goes back to default because the
/// Rust runtime ignores it in the shell; SIGINT only for foreground commands.
pub(crate) fn reset_child_signals(foreground: bool) -> Result<()> {
    set_action(Signal::SIGPIPE, SigHandler::SigDfl, SaFlags::empty())?;
    if foreground {
        set_action(Signal::SIGINT, SigHandler::SigDfl, SaFlags::empty())?;
    }
    Ok(())
}

pub(crate) fn send_signal(pid: Pid, signal: Signal) -> Result<()> {
    debug!("SIGNAL: sending {:?} to pid {}", signal, pid);
    kill(pid, signal).map_err(|e| {
        error!("SIGNAL: failed to send {:?} to pid {}: {}", signal, pid, e);
        e.into()
    })
}
