// SPDX-License-Identifier: Apache-2.0

//! Collapses the process to uid 0, gid 0, no supplementary groups and an
//! empty environment before a trusted tool is exec'd.

use hatch_core::{HatchError, PrivilegeStep};

/// Brings the process to the privileged state the trusted tools run in.
pub trait PrivilegeControl {
    /// Runs every normalization step in order, stopping at the first failure.
    fn normalize(&self) -> Result<(), HatchError>;
}

/// Normalizes the real process identity. Requires the setuid-root bit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPrivilege;

#[cfg(unix)]
impl PrivilegeControl for SystemPrivilege {
    fn normalize(&self) -> Result<(), HatchError> {
        use nix::unistd::{setgid, setuid, Gid, Uid};

        // SAFETY: hatch-su is single-threaded; nothing else reads environ.
        unsafe { nix::env::clearenv() }.map_err(|e| HatchError::Privilege {
            step: PrivilegeStep::ClearEnv,
            source: std::io::Error::other(e),
        })?;

        setuid(Uid::from_raw(0)).map_err(|e| privilege_error(PrivilegeStep::SetUid, e))?;
        setgid(Gid::from_raw(0)).map_err(|e| privilege_error(PrivilegeStep::SetGid, e))?;
        drop_supplementary_groups().map_err(|e| privilege_error(PrivilegeStep::SetGroups, e))?;
        Ok(())
    }
}

#[cfg(not(unix))]
impl PrivilegeControl for SystemPrivilege {
    fn normalize(&self) -> Result<(), HatchError> {
        Err(HatchError::Privilege {
            step: PrivilegeStep::SetUid,
            source: std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "privilege normalization is not supported on this platform",
            ),
        })
    }
}

#[cfg(unix)]
fn privilege_error(step: PrivilegeStep, errno: nix::errno::Errno) -> HatchError {
    HatchError::Privilege {
        step,
        source: std::io::Error::from(errno),
    }
}

#[cfg(all(unix, not(target_vendor = "apple")))]
fn drop_supplementary_groups() -> nix::Result<()> {
    nix::unistd::setgroups(&[])
}

/// nix does not expose setgroups(2) on Apple targets.
#[cfg(target_vendor = "apple")]
fn drop_supplementary_groups() -> nix::Result<()> {
    // SAFETY: a zero-length list never dereferences the pointer.
    let rc = unsafe { nix::libc::setgroups(0, std::ptr::null()) };
    nix::errno::Errno::result(rc).map(drop)
}
