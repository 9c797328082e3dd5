//! Locating and starting the local inference service binary.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::AssistantError;

/// Find `name` in the directories of `search_path`.
///
/// Uses the `which` crate, which also tries the platform's executable
/// extensions (PATHEXT on Windows). An unset search path or a missing binary
/// is an expected outcome and yields `None`.
pub fn executable_on_path(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    let search_path = search_path.filter(|p| !p.is_empty())?;
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    match which::which_in(name, Some(search_path), cwd) {
        Ok(path) => {
            debug!("Found {} at {}", name, path.display());
            Some(path)
        }
        Err(e) => {
            debug!("{} not found on search path: {}", name, e);
            None
        }
    }
}

/// Start `<executable> serve` as a detached background process and return its pid.
///
/// The child handle is dropped immediately; the service keeps running after
/// this process exits. On unix it gets its own process group, so a Ctrl-C or
/// hangup aimed at this process does not reach it.
pub fn start_detached(executable: &Path) -> Result<u32, AssistantError> {
    let mut command = Command::new(executable);
    command
        .arg("serve")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let child = command.spawn().map_err(AssistantError::SpawnFailed)?;
    let pid = child.id();

    debug!("Started {} serve (pid {})", executable.display(), pid);
    Ok(pid)
}
