use nix::unistd::Pid;
use tracing::debug;

/// Replaced by the shell's own pid wherever it appears in an input line.
pub const PID_MARKER: &str = "$$";

/// Substitutes every `$$` in `input` with `pid`.
///
/// Matches are taken left to right without overlap and the inserted digits are
/// never rescanned, so `$$$` becomes `<pid>$`.
pub fn expand_pid(input: &str, pid: Pid) -> String {
    if !input.contains(PID_MARKER) {
        return input.to_string();
    }

    let pid = pid.to_string();
    let mut expanded = String::with_capacity(input.len() + pid.len());
    let mut rest = input;
    let mut count = 0;
    while let Some(idx) = rest.find(PID_MARKER) {
        expanded.push_str(&rest[..idx]);
        expanded.push_str(&pid);
        rest = &rest[idx + PID_MARKER.len()..];
        count += 1;
    }
    expanded.push_str(rest);

    debug!("expanded {} pid marker(s): {:?} -> {:?}", count, input, expanded);
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid() -> Pid {
        Pid::from_raw(4242)
    }

    #[test]
    fn no_marker_is_untouched() {
        assert_eq!(expand_pid("ls -la /tmp", pid()), "ls -la /tmp");
        assert_eq!(expand_pid("echo $HOME $", pid()), "echo $HOME $");
    }

    #[test]
    fn every_marker_is_replaced_in_place() {
        assert_eq!(expand_pid("echo $$", pid()), "echo 4242");
        assert_eq!(
            expand_pid("touch a$$b $$.txt", pid()),
            "touch a4242b 4242.txt"
        );
    }

    #[test]
    fn odd_runs_leave_the_tail() {
        assert_eq!(expand_pid("$$$", pid()), "4242$");
        assert_eq!(expand_pid("$$$$", pid()), "42424242");
        assert_eq!(expand_pid("$$$$$", pid()), "42424242$");
    }

    #[test]
    fn marker_count_matches_pid_count() {
        let line = "$$ a $$ b $$";
        let expanded = expand_pid(line, pid());
        assert_eq!(expanded.matches("4242").count(), 3);
        assert_eq!(expanded.replace("4242", "$$"), line);
    }
}
