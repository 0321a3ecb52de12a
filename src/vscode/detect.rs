//! Detection of running VS Code instances with the Kilo Code extension.

use super::process::{ProcessList, SystemProcesses};
use super::{EDITOR_BINARY, KILO_EXTENSION_ID};
use std::path::PathBuf;

/// A running editor process observed via the OS process table.
///
/// Lifetime is entirely owned by the OS; this is a point-in-time snapshot
/// and may be stale by the time it is inspected.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// OS process id
    pub pid: u32,
    /// Workspace path passed on the command line, if any
    pub workspace: Option<PathBuf>,
    /// `--user-data-dir` value, if any
    pub user_data_dir: Option<PathBuf>,
    /// Whether the user-data dir carries the Kilo Code extension
    pub has_kilo: bool,
}

fn is_editor_process(name: &str) -> bool {
    let name = name.strip_suffix(".exe").unwrap_or(name);
    name.eq_ignore_ascii_case(EDITOR_BINARY)
}

/// Flags whose value is the following argv element. Only the ones relevant
/// to workspace extraction; anything else starting with `-` is skipped
/// wholesale.
const VALUE_FLAGS: [&str; 2] = ["--user-data-dir", "--extensions-dir"];

/// Extract `(user_data_dir, workspace)` from an editor argument vector.
///
/// The workspace is the first argument after the program name that is
/// neither a flag nor a flag's value. Both the separated and the `=` form
/// of `--user-data-dir` are accepted.
fn parse_cmdline(args: &[String]) -> (Option<PathBuf>, Option<PathBuf>) {
    let mut user_data_dir = None;
    let mut workspace = None;

    let mut i = 1; // skip the program name
    while i < args.len() {
        let arg = args[i].as_str();
        if let Some(value) = arg.strip_prefix("--user-data-dir=") {
            user_data_dir = Some(PathBuf::from(value));
        } else if VALUE_FLAGS.contains(&arg) {
            if arg == "--user-data-dir"
                && let Some(value) = args.get(i + 1)
            {
                user_data_dir = Some(PathBuf::from(value));
            }
            i += 1; // the value is consumed either way
        } else if !arg.starts_with('-') && workspace.is_none() {
            workspace = Some(PathBuf::from(arg));
        }
        i += 1;
    }

    (user_data_dir, workspace)
}

/// Detect running editor instances that have the Kilo Code extension.
///
/// A process is included only when its executable name matches the editor
/// binary, a user-data dir was found on its command line, and
/// `<user_data_dir>/extensions/<extension-id>` exists.
pub fn detect_instances(processes: &impl ProcessList) -> Vec<Instance> {
    let mut instances = Vec::new();

    for record in processes.processes() {
        if !is_editor_process(&record.name) {
            continue;
        }
        let (user_data_dir, workspace) = parse_cmdline(&record.cmdline);
        let Some(user_data_dir) = user_data_dir else {
            continue;
        };

        let has_kilo = user_data_dir
            .join("extensions")
            .join(KILO_EXTENSION_ID)
            .exists();
        if !has_kilo {
            continue;
        }

        log::debug!(
            "Found editor instance pid={} user_data_dir={:?} workspace={:?}",
            record.pid,
            user_data_dir,
            workspace
        );
        instances.push(Instance {
            pid: record.pid,
            workspace,
            user_data_dir: Some(user_data_dir),
            has_kilo,
        });
    }

    instances
}

/// Detect instances from the live process table.
pub fn detect_vscode_instances() -> Vec<Instance> {
    detect_instances(&SystemProcesses)
}
