// SPDX-License-Identifier: Apache-2.0

//! The trusted tool table: the four executables hatch-su is allowed to exec.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::operation::Operation;

pub const CHROOT_TOOL: &str = env!("HATCH_CHROOT_TOOL");
pub const TAR_TOOL: &str = env!("HATCH_TAR_TOOL");
pub const CHOWN_TOOL: &str = env!("HATCH_CHOWN_TOOL");
pub const RM_TOOL: &str = env!("HATCH_RM_TOOL");

/// Absolute paths of the trusted tools, one per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolTable {
    chroot: PathBuf,
    tar: PathBuf,
    chown: PathBuf,
    rm: PathBuf,
}

impl ToolTable {
    /// Table baked in at build time. Never influenced by the caller.
    pub fn compiled() -> Self {
        ToolTable {
            chroot: PathBuf::from(CHROOT_TOOL),
            tar: PathBuf::from(TAR_TOOL),
            chown: PathBuf::from(CHOWN_TOOL),
            rm: PathBuf::from(RM_TOOL),
        }
    }

    /// Builds a custom table. Every path must be absolute and name a file.
    pub fn new<P: Into<PathBuf>>(chroot: P, tar: P, chown: P, rm: P) -> Result<Self, String> {
        let table = ToolTable {
            chroot: chroot.into(),
            tar: tar.into(),
            chown: chown.into(),
            rm: rm.into(),
        };
        for op in Operation::ALL {
            let path = table.path_for(op);
            if !path.is_absolute() {
                return Err(format!(
                    "tool for {op} must be an absolute path: {}",
                    path.display()
                ));
            }
            if path.file_name().is_none() {
                return Err(format!(
                    "tool for {op} does not name a file: {}",
                    path.display()
                ));
            }
        }
        Ok(table)
    }

    /// Executable bound to an operation.
    pub fn path_for(&self, op: Operation) -> &Path {
        match op {
            Operation::EnterAndRun => &self.chroot,
            Operation::ExtractArchive => &self.tar,
            Operation::NormalizeOwnership => &self.chown,
            Operation::Destroy => &self.rm,
        }
    }

    /// Basename used as `argv[0]` for an operation's tool.
    pub fn name_for(&self, op: Operation) -> &OsStr {
        let path = self.path_for(op);
        path.file_name().unwrap_or(path.as_os_str())
    }
}
