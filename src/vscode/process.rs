//! Narrow process-table abstraction.
//!
//! Instance detection only needs each process's pid, executable name, and
//! argument vector, so that is all this interface exposes. Detection logic
//! stays OS-agnostic and testable with fakes; `sysinfo` is confined to the
//! one live implementation.

/// Snapshot of a single live process.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    /// OS process id
    pub pid: u32,
    /// Executable name (no path)
    pub name: String,
    /// Full command-line argument vector, program name first
    pub cmdline: Vec<String>,
}

/// Source of process snapshots.
pub trait ProcessList {
    /// Enumerate all live processes visible to this user.
    fn processes(&self) -> Vec<ProcessRecord>;
}

/// Live process table backed by `sysinfo`.
///
/// Processes that vanish or become unreadable between enumeration and
/// inspection simply drop out of the snapshot; concurrent process churn is
/// expected and never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcesses;

impl ProcessList for SystemProcesses {
    fn processes(&self) -> Vec<ProcessRecord> {
        use sysinfo::{ProcessRefreshKind, RefreshKind, System, UpdateKind};

        let system = System::new_with_specifics(
            RefreshKind::nothing()
                .with_processes(ProcessRefreshKind::nothing().with_cmd(UpdateKind::Always)),
        );

        system
            .processes()
            .iter()
            .map(|(pid, process)| ProcessRecord {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().to_string(),
                cmdline: process
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy().to_string())
                    .collect(),
            })
            .collect()
    }
}
