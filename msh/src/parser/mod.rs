pub mod expansion;

use msh_types::{CommandRecord, MshError, MshResult};
use nix::unistd::Pid;
use tracing::debug;

pub use expansion::{PID_MARKER, expand_pid};

const COMMENT: char = '#';
const INPUT_REDIRECT: &str = "<";
const OUTPUT_REDIRECT: &str = ">";
const BACKGROUND: &str = "&";

/// Result of parsing one raw input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Blank,
    Comment,
    Command(CommandRecord),
}

/// Turns a raw line into something the shell can dispatch.
///
/// `foreground_only` is sampled once per line: when set, a trailing `&` is
/// dropped and the command runs in the foreground.
pub fn parse_line(input: &str, shell_pid: Pid, foreground_only: bool) -> MshResult<Line> {
    let trimmed = input.trim_start();
    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if trimmed.starts_with(COMMENT) {
        return Ok(Line::Comment);
    }

    let expanded = expand_pid(input, shell_pid);
    let tokens: Vec<&str> = expanded.split_whitespace().collect();
    let record = parse_tokens(&tokens, foreground_only)?;
    debug!("parsed {:?} -> {:?}", input, record);
    Ok(Line::Command(record))
}

fn parse_tokens(tokens: &[&str], foreground_only: bool) -> MshResult<CommandRecord> {
    let (cmd, rest) = tokens
        .split_first()
        .ok_or_else(|| MshError::Parse("empty command".to_string()))?;

    let mut record = CommandRecord::new(cmd.to_string());
    let mut iter = rest.iter().enumerate();
    while let Some((idx, token)) = iter.next() {
        match *token {
            INPUT_REDIRECT => {
                let (_, path) = iter.next().ok_or_else(|| missing_file(INPUT_REDIRECT))?;
                record = record.with_infile(path.to_string());
            }
            OUTPUT_REDIRECT => {
                let (_, path) = iter.next().ok_or_else(|| missing_file(OUTPUT_REDIRECT))?;
                record = record.with_outfile(path.to_string());
            }
            BACKGROUND if idx == rest.len() - 1 => {
                if foreground_only {
                    debug!("foreground-only mode: ignoring trailing &");
                } else {
                    record = record.with_background(true);
                }
            }
            arg => {
                record = record.with_arg(arg.to_string());
            }
        }
    }
    Ok(record)
}

fn missing_file(op: &str) -> MshError {
    MshError::Parse(format!("missing file after '{op}'"))
}
