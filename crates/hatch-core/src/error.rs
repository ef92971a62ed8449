// SPDX-License-Identifier: Apache-2.0

//! Failure taxonomy shared by every dispatcher stage.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit status used for every failure path.
///
/// Existing callers only test for "not zero", so failure kinds are not
/// distinguished by status.
pub const FAILURE_STATUS: i32 = 99;

/// Coarse failure classes, one per dispatcher precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Usage,
    Dispatch,
    Authorization,
    Privilege,
    Exec,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Usage => write!(f, "usage"),
            FailureKind::Dispatch => write!(f, "dispatch"),
            FailureKind::Authorization => write!(f, "authorization"),
            FailureKind::Privilege => write!(f, "privilege"),
            FailureKind::Exec => write!(f, "exec"),
        }
    }
}

/// Privilege normalization steps, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivilegeStep {
    ClearEnv,
    SetUid,
    SetGid,
    SetGroups,
}

impl fmt::Display for PrivilegeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrivilegeStep::ClearEnv => write!(f, "clearenv()"),
            PrivilegeStep::SetUid => write!(f, "setuid(0)"),
            PrivilegeStep::SetGid => write!(f, "setgid(0)"),
            PrivilegeStep::SetGroups => write!(f, "setgroups()"),
        }
    }
}

/// Any reason an invocation was refused. All of them are fatal.
#[derive(Debug, Error)]
pub enum HatchError {
    #[error("{0}")]
    Usage(&'static str),

    #[error("unknown command `{0}`")]
    UnknownVerb(String),

    #[error("wrong archive kind `{0}` (expected tar, tar.gz or tar.bz2)")]
    UnknownArchiveKind(String),

    #[error("not a chroot environment: {}", .path.display())]
    NotManaged { path: PathBuf },

    #[error("can't {step}: {source}")]
    Privilege {
        step: PrivilegeStep,
        #[source]
        source: io::Error,
    },

    #[error("can't exec {}: {source}", .tool.display())]
    Exec {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HatchError {
    /// Returns the failure class of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            HatchError::Usage(_) => FailureKind::Usage,
            HatchError::UnknownVerb(_) | HatchError::UnknownArchiveKind(_) => FailureKind::Dispatch,
            HatchError::NotManaged { .. } => FailureKind::Authorization,
            HatchError::Privilege { .. } => FailureKind::Privilege,
            HatchError::Exec { .. } => FailureKind::Exec,
        }
    }

    /// Returns the process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        FAILURE_STATUS
    }
}
