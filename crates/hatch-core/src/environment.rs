// SPDX-License-Identifier: Apache-2.0

//! Marker-file authorization for chroot environments.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::HatchError;

/// Marker file name baked in at build time (see `trusted-tools.toml`).
pub const MARKER: &str = env!("HATCH_MARKER");

/// A directory that carried a readable marker when it was checked.
///
/// Holding one is the only way to build an argument vector. The check is not
/// a lock: the directory can change between validation and exec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedEnvironment {
    path: PathBuf,
}

impl ManagedEnvironment {
    /// Checks that `marker` exists directly beneath `path` and is readable.
    pub fn validate(path: &Path, marker: &OsStr) -> Result<ManagedEnvironment, HatchError> {
        if path.as_os_str().is_empty() || marker_is_readable(&path.join(marker)).is_err() {
            return Err(HatchError::NotManaged {
                path: path.to_path_buf(),
            });
        }
        Ok(ManagedEnvironment {
            path: path.to_path_buf(),
        })
    }

    /// Path exactly as the caller supplied it.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Probes read access with the caller's real uid and gid.
#[cfg(unix)]
fn marker_is_readable(marker: &Path) -> std::io::Result<()> {
    use nix::unistd::{access, AccessFlags};

    access(marker, AccessFlags::R_OK).map_err(std::io::Error::from)
}

#[cfg(not(unix))]
fn marker_is_readable(marker: &Path) -> std::io::Result<()> {
    std::fs::File::open(marker).map(|_| ())
}
