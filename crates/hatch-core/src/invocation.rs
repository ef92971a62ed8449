//! Usage validation: turns the raw process arguments into a typed invocation.

use std::ffi::OsString;
use std::path::Path;

use crate::error::HatchError;
use crate::operation::{ArchiveKind, Operation};

/// Smallest accepted argument count, program name included.
pub const MIN_ARGS: usize = 3;

/// Largest accepted argument count, program name included.
pub const MAX_ARGS: usize = 128;

/// A routed, count-checked request. Operands are kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    EnterAndRun {
        path: OsString,
        command: Vec<OsString>,
    },
    ExtractArchive {
        path: OsString,
        kind: ArchiveKind,
        file: OsString,
    },
    NormalizeOwnership {
        path: OsString,
    },
    Destroy {
        path: OsString,
    },
}

impl Invocation {
    /// Parses `argv` as handed to the process (`argv[0]` is the program name).
    ///
    /// Checks run in a fixed order: overall count, verb, per-verb count, then
    /// archive kind. Nothing here touches the filesystem.
    pub fn parse(args: Vec<OsString>) -> Result<Invocation, HatchError> {
        if args.len() < MIN_ARGS {
            return Err(HatchError::Usage("too few arguments"));
        }
        if args.len() > MAX_ARGS {
            return Err(HatchError::Usage("too many arguments"));
        }

        let total = args.len();
        let mut rest = args.into_iter().skip(1);
        let (Some(verb), Some(path)) = (rest.next(), rest.next()) else {
            return Err(HatchError::Usage("too few arguments"));
        };

        let operation = Operation::route(&verb)?;
        let expected = match operation {
            Operation::EnterAndRun => None,
            Operation::ExtractArchive => Some(5),
            Operation::NormalizeOwnership | Operation::Destroy => Some(3),
        };
        if expected.is_some_and(|n| n != total) {
            return Err(HatchError::Usage("wrong number of arguments"));
        }

        Ok(match operation {
            Operation::EnterAndRun => Invocation::EnterAndRun {
                path,
                command: rest.collect(),
            },
            Operation::ExtractArchive => {
                let (Some(kind), Some(file)) = (rest.next(), rest.next()) else {
                    return Err(HatchError::Usage("wrong number of arguments"));
                };
                Invocation::ExtractArchive {
                    path,
                    kind: ArchiveKind::parse(&kind)?,
                    file,
                }
            }
            Operation::NormalizeOwnership => Invocation::NormalizeOwnership { path },
            Operation::Destroy => Invocation::Destroy { path },
        })
    }

    /// Operation selected by the verb.
    pub fn operation(&self) -> Operation {
        match self {
            Invocation::EnterAndRun { .. } => Operation::EnterAndRun,
            Invocation::ExtractArchive { .. } => Operation::ExtractArchive,
            Invocation::NormalizeOwnership { .. } => Operation::NormalizeOwnership,
            Invocation::Destroy { .. } => Operation::Destroy,
        }
    }

    /// Target chroot environment path, as supplied by the caller.
    pub fn target(&self) -> &Path {
        match self {
            Invocation::EnterAndRun { path, .. }
            | Invocation::ExtractArchive { path, .. }
            | Invocation::NormalizeOwnership { path }
            | Invocation::Destroy { path } => Path::new(path),
        }
    }
}
