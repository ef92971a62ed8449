// SPDX-License-Identifier: Apache-2.0

//! Hands control to the trusted tool.

use std::process::Command;

use hatch_core::{ArgVector, HatchError};

/// How control left the dispatcher when a launch did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// The process image was replaced. Real exec never returns this; code
    /// after it is unreachable in a production binary.
    Replaced,
    /// The tool ran as a child and exited with this status, which the
    /// dispatcher must adopt as its own.
    Forwarded(i32),
}

/// Starts the trusted tool described by an [`ArgVector`].
pub trait Trampoline {
    fn launch(&self, argv: &ArgVector) -> Result<Handoff, HatchError>;
}

/// Replaces the current process image via `execv(2)`. Returns only on error.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecTrampoline;

#[cfg(unix)]
impl Trampoline for ExecTrampoline {
    fn launch(&self, argv: &ArgVector) -> Result<Handoff, HatchError> {
        use std::os::unix::process::CommandExt;

        let err = tool_command(argv).exec();

        // exec() only returns on error
        Err(HatchError::Exec {
            tool: argv.program().to_path_buf(),
            source: err,
        })
    }
}

/// Runs the tool as a child and forwards its exit status.
///
/// Stand-in for targets without image replacement. The tool gets a new PID,
/// so the caller's view of process identity differs from [`ExecTrampoline`],
/// but the observed exit status is the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTrampoline;

impl Trampoline for SpawnTrampoline {
    fn launch(&self, argv: &ArgVector) -> Result<Handoff, HatchError> {
        let status = tool_command(argv)
            .status()
            .map_err(|e| HatchError::Exec {
                tool: argv.program().to_path_buf(),
                source: e,
            })?;
        Ok(Handoff::Forwarded(exit_code(status)))
    }
}

/// Command for the tool with `argv[0]` from the table and an empty environment.
fn tool_command(argv: &ArgVector) -> Command {
    let mut cmd = Command::new(argv.program());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.arg0(argv.arg0());
    }
    cmd.args(argv.operands()).env_clear();
    cmd
}

/// Shell-style status: the exit code, or 128 + signal number.
#[cfg(unix)]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(hatch_core::FAILURE_STATUS)
}

#[cfg(not(unix))]
fn exit_code(status: std::process::ExitStatus) -> i32 {
    status.code().unwrap_or(hatch_core::FAILURE_STATUS)
}
