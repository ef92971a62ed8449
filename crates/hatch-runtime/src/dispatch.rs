// SPDX-License-Identifier: Apache-2.0

//! The dispatcher pipeline: route, validate, normalize, build, exec.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::{self, Write};

use hatch_core::{ArgVector, HatchError, Invocation, ManagedEnvironment, ToolTable, MARKER};

use crate::privilege::PrivilegeControl;
use crate::trampoline::{Handoff, Trampoline};

/// Pipeline node an invocation was in when it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    RouteCommand,
    ValidatePath,
    NormalizePrivilege,
    Exec,
}

/// A refused invocation and the stage that refused it.
#[derive(Debug)]
pub struct Rejection {
    pub stage: Stage,
    pub error: HatchError,
}

impl Rejection {
    fn at(stage: Stage) -> impl FnOnce(HatchError) -> Rejection {
        move |error| Rejection { stage, error }
    }

    pub fn exit_code(&self) -> i32 {
        self.error.exit_code()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for Rejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Everything fixed before the first argument is looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub tools: ToolTable,
    pub marker: OsString,
    /// Print the argument vector to stdout before launching.
    pub echo_argv: bool,
}

impl DispatchConfig {
    /// Configuration baked in at build time.
    pub fn compiled() -> Self {
        DispatchConfig {
            tools: ToolTable::compiled(),
            marker: OsString::from(MARKER),
            echo_argv: cfg!(feature = "echo-argv"),
        }
    }
}

/// Runs one invocation through the pipeline.
pub struct Dispatcher<P, T> {
    config: DispatchConfig,
    privilege: P,
    trampoline: T,
}

impl<P: PrivilegeControl, T: Trampoline> Dispatcher<P, T> {
    pub fn new(config: DispatchConfig, privilege: P, trampoline: T) -> Self {
        Dispatcher {
            config,
            privilege,
            trampoline,
        }
    }

    /// Dispatches raw process arguments (`args[0]` is the program name).
    ///
    /// Every stage runs only after the previous one succeeded. Nothing
    /// privileged happens before the marker check passes.
    pub fn run(&self, args: Vec<OsString>) -> Result<Handoff, Rejection> {
        let invocation = Invocation::parse(args).map_err(Rejection::at(Stage::RouteCommand))?;

        let env = ManagedEnvironment::validate(invocation.target(), self.marker())
            .map_err(Rejection::at(Stage::ValidatePath))?;

        self.privilege
            .normalize()
            .map_err(Rejection::at(Stage::NormalizePrivilege))?;

        let argv = ArgVector::build(&self.config.tools, &env, &invocation);
        if self.config.echo_argv {
            echo(&mut io::stdout().lock(), &argv);
        }

        self.trampoline
            .launch(&argv)
            .map_err(Rejection::at(Stage::Exec))
    }

    fn marker(&self) -> &OsStr {
        &self.config.marker
    }
}

fn echo(out: &mut impl Write, argv: &ArgVector) {
    // Best effort: a closed stdout must not stop the launch.
    let _ = writeln!(out, "{argv}");
    let _ = out.flush();
}
