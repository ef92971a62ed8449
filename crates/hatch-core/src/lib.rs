// SPDX-License-Identifier: Apache-2.0

//! Unprivileged half of hatch-su: usage validation, verb routing, marker
//! authorization and argument vector construction.

pub mod argv;
pub mod environment;
pub mod error;
pub mod invocation;
pub mod operation;
pub mod tools;

pub use argv::ArgVector;
pub use environment::{ManagedEnvironment, MARKER};
pub use error::{FailureKind, HatchError, PrivilegeStep, FAILURE_STATUS};
pub use invocation::{Invocation, MAX_ARGS, MIN_ARGS};
pub use operation::{ArchiveKind, Operation};
pub use tools::ToolTable;
