//! The closed set of privileged operations and the verbs that select them.

use std::ffi::OsStr;
use std::fmt;

use crate::error::HatchError;

/// One of the four operations hatch-su can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    EnterAndRun,
    ExtractArchive,
    NormalizeOwnership,
    Destroy,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::EnterAndRun,
        Operation::ExtractArchive,
        Operation::NormalizeOwnership,
        Operation::Destroy,
    ];

    /// Maps a verb token to its operation.
    ///
    /// Matching is exact and case-sensitive. Non-UTF-8 tokens never match.
    pub fn route(verb: &OsStr) -> Result<Operation, HatchError> {
        let Some(token) = verb.to_str() else {
            return Err(HatchError::UnknownVerb(verb.to_string_lossy().into_owned()));
        };
        Operation::ALL
            .into_iter()
            .find(|op| op.verb() == token)
            .ok_or_else(|| HatchError::UnknownVerb(token.to_string()))
    }

    /// Command-line verb for this operation.
    pub fn verb(self) -> &'static str {
        match self {
            Operation::EnterAndRun => "chroot_2_2",
            Operation::ExtractArchive => "extract_tar_2_2",
            Operation::NormalizeOwnership => "set_permissions_2_2",
            Operation::Destroy => "remove_chroot_2_2",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Archive formats the extraction tool is asked to unpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Tar,
    TarGz,
    TarBz2,
}

impl ArchiveKind {
    /// Parses the caller's kind operand.
    pub fn parse(kind: &OsStr) -> Result<ArchiveKind, HatchError> {
        match kind.to_str() {
            Some("tar") => Ok(ArchiveKind::Tar),
            Some("tar.gz") => Ok(ArchiveKind::TarGz),
            Some("tar.bz2") => Ok(ArchiveKind::TarBz2),
            _ => Err(HatchError::UnknownArchiveKind(
                kind.to_string_lossy().into_owned(),
            )),
        }
    }

    /// Extraction flag passed to the archive tool.
    pub fn extract_flag(self) -> &'static str {
        match self {
            ArchiveKind::Tar => "-xf",
            ArchiveKind::TarGz => "-xzf",
            ArchiveKind::TarBz2 => "-xjf",
        }
    }
}
