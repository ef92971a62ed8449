//! hatch-su binary entrypoint.
//!
//! Installed setuid root. Usage:
//!
//! ```text
//! hatch-su chroot_2_2 <path> [command [args...]]
//! hatch-su extract_tar_2_2 <path> <tar|tar.gz|tar.bz2> <file>
//! hatch-su set_permissions_2_2 <path>
//! hatch-su remove_chroot_2_2 <path>
//! ```

mod report;

use std::env;
use std::process;

use hatch_runtime::{DispatchConfig, Dispatcher, Handoff, SystemPrivilege};

/// Dispatches the process arguments and exits with the outcome's status.
fn main() {
    let dispatcher = Dispatcher::new(
        DispatchConfig::compiled(),
        SystemPrivilege,
        platform_trampoline(),
    );

    match dispatcher.run(env::args_os().collect()) {
        Ok(Handoff::Replaced) => {}
        Ok(Handoff::Forwarded(code)) => process::exit(code),
        Err(rejection) => {
            report::failure(&rejection);
            process::exit(rejection.exit_code());
        }
    }
}

#[cfg(unix)]
fn platform_trampoline() -> hatch_runtime::ExecTrampoline {
    hatch_runtime::ExecTrampoline
}

#[cfg(not(unix))]
fn platform_trampoline() -> hatch_runtime::SpawnTrampoline {
    hatch_runtime::SpawnTrampoline
}
