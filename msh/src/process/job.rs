use msh_types::Status;
use nix::unistd::Pid;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Background pids plus the status of the last completed command.
///
/// Owned by the shell for its whole lifetime. `foreground_only` points at the
/// flag the SIGTSTP handler flips; the table only ever reads it.
#[derive(Debug)]
pub struct JobTable {
    background_pids: Vec<Pid>,
    last_status: Status,
    foreground_only: &'static AtomicBool,
}

impl JobTable {
    pub fn new(foreground_only: &'static AtomicBool) -> Self {
        JobTable {
            background_pids: Vec::new(),
            last_status: Status::default(),
            foreground_only,
        }
    }

    pub fn foreground_only(&self) -> bool {
        self.foreground_only.load(Ordering::SeqCst)
    }

    pub fn last_status(&self) -> Status {
        self.last_status
    }

    pub fn set_last_status(&mut self, status: Status) {
        debug!("last status {:?} -> {:?}", self.last_status, status);
        self.last_status = status;
    }

    /// Pids in the order they were started.
    pub fn background_pids(&self) -> &[Pid] {
        &self.background_pids
    }

    pub fn has_jobs(&self) -> bool {
        !self.background_pids.is_empty()
    }

    pub fn push_background(&mut self, pid: Pid) {
        if self.background_pids.contains(&pid) {
            debug!("pid {} is already tracked", pid);
            return;
        }
        self.background_pids.push(pid);
    }

    /// Returns `true` if `pid` was tracked.
    pub fn remove(&mut self, pid: Pid) -> bool {
        let before = self.background_pids.len();
        self.background_pids.retain(|p| *p != pid);
        before != self.background_pids.len()
    }

    pub(crate) fn take_background_pids(&mut self) -> Vec<Pid> {
        std::mem::take(&mut self.background_pids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static FLAG: AtomicBool = AtomicBool::new(false);

    #[test]
    fn starts_with_a_clean_exit_status() {
        let table = JobTable::new(&FLAG);
        assert_eq!(table.last_status(), Status::Exited(0));
        assert!(!table.has_jobs());
    }

    #[test]
    fn background_pids_keep_insertion_order_without_duplicates() {
        let mut table = JobTable::new(&FLAG);
        for raw in [30, 10, 20, 10] {
            table.push_background(Pid::from_raw(raw));
        }
        assert_eq!(
            table.background_pids(),
            [Pid::from_raw(30), Pid::from_raw(10), Pid::from_raw(20)]
        );

        assert!(table.remove(Pid::from_raw(10)));
        assert!(!table.remove(Pid::from_raw(10)));
        assert_eq!(
            table.background_pids(),
            [Pid::from_raw(30), Pid::from_raw(20)]
        );
    }

    #[test]
    fn reads_the_shared_flag() {
        static LOCAL: AtomicBool = AtomicBool::new(false);
        let table = JobTable::new(&LOCAL);
        assert!(!table.foreground_only());
        LOCAL.store(true, Ordering::SeqCst);
        assert!(table.foreground_only());
    }
}
