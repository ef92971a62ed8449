// SPDX-License-Identifier: Apache-2.0

//! Privileged half of hatch-su: identity normalization and handing the
//! process over to a trusted tool.

pub mod dispatch;
pub mod privilege;
pub mod trampoline;

pub use dispatch::{DispatchConfig, Dispatcher, Rejection, Stage};
pub use privilege::{PrivilegeControl, SystemPrivilege};
#[cfg(unix)]
pub use trampoline::ExecTrampoline;
pub use trampoline::{Handoff, SpawnTrampoline, Trampoline};

