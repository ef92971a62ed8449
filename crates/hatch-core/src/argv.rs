//! Fixed-shape argument vectors for the trusted tools.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::environment::ManagedEnvironment;
use crate::invocation::Invocation;
use crate::tools::ToolTable;

/// Program path plus a discrete argument list. Never joined into one string.
///
/// `argv()[0]` is always the tool's basename from the [`ToolTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgVector {
    program: PathBuf,
    argv: Vec<OsString>,
}

impl ArgVector {
    /// Fills the operation's template with validated invocation data.
    ///
    /// The target path comes from `env`, so a vector can only be built for a
    /// directory that passed the marker check.
    pub fn build(tools: &ToolTable, env: &ManagedEnvironment, invocation: &Invocation) -> Self {
        let op = invocation.operation();
        let path = env.path().as_os_str().to_os_string();
        let mut argv = vec![tools.name_for(op).to_os_string()];

        match invocation {
            Invocation::EnterAndRun { command, .. } => {
                argv.push(path);
                argv.extend(command.iter().cloned());
            }
            Invocation::ExtractArchive { kind, file, .. } => {
                argv.push("-C".into());
                argv.push(path);
                argv.push(kind.extract_flag().into());
                argv.push(file.clone());
            }
            Invocation::NormalizeOwnership { .. } => {
                argv.push("root:root".into());
                argv.push(path);
            }
            Invocation::Destroy { .. } => {
                argv.push("-r".into());
                argv.push("-f".into());
                argv.push(path);
            }
        }

        ArgVector {
            program: tools.path_for(op).to_path_buf(),
            argv,
        }
    }

    /// Absolute path of the executable to run.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Full argument vector, `argv[0]` included.
    pub fn argv(&self) -> &[OsString] {
        &self.argv
    }

    pub fn arg0(&self) -> &OsStr {
        &self.argv[0]
    }

    /// Arguments after `argv[0]`.
    pub fn operands(&self) -> &[OsString] {
        &self.argv[1..]
    }
}

/// One argument per line, lossily decoded.
impl fmt::Display for ArgVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.argv.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use crate::environment::MARKER;

    fn tools() -> ToolTable {
        ToolTable::new("/usr/sbin/chroot", "/bin/tar", "/bin/chown", "/bin/rm").unwrap()
    }

    fn managed() -> (tempfile::TempDir, ManagedEnvironment) {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(MARKER), "").unwrap();
        let env = ManagedEnvironment::validate(tmp.path(), OsStr::new(MARKER)).unwrap();
        (tmp, env)
    }

    fn strings(items: &[&str]) -> Vec<OsString> {
        items.iter().map(OsString::from).collect()
    }

    #[test]
    fn enter_and_run_appends_command() {
        let (tmp, env) = managed();
        let inv = Invocation::EnterAndRun {
            path: tmp.path().as_os_str().to_os_string(),
            command: strings(&["/bin/true"]),
        };
        let argv = ArgVector::build(&tools(), &env, &inv);
        let path = tmp.path().to_str().unwrap();

        assert_eq!(argv.program(), Path::new("/usr/sbin/chroot"));
        assert_eq!(argv.argv(), strings(&["chroot", path, "/bin/true"]).as_slice());
    }

    #[test]
    fn enter_and_run_without_command() {
        let (tmp, env) = managed();
        let inv = Invocation::EnterAndRun {
            path: tmp.path().as_os_str().to_os_string(),
            command: Vec::new(),
        };
        let argv = ArgVector::build(&tools(), &env, &inv);
        assert_eq!(argv.operands(), &[tmp.path().as_os_str().to_os_string()]);
    }

    #[test]
    fn extract_archive_uses_kind_flag() {
        let (tmp, env) = managed();
        let inv = Invocation::ExtractArchive {
            path: tmp.path().as_os_str().to_os_string(),
            kind: crate::operation::ArchiveKind::TarGz,
            file: OsString::from("pkg.tar.gz"),
        };
        let argv = ArgVector::build(&tools(), &env, &inv);
        let path = tmp.path().to_str().unwrap();

        assert_eq!(argv.program(), Path::new("/bin/tar"));
        assert_eq!(
            argv.argv(),
            strings(&["tar", "-C", path, "-xzf", "pkg.tar.gz"]).as_slice()
        );
    }

    #[test]
    fn normalize_ownership_chowns_to_root() {
        let (tmp, env) = managed();
        let inv = Invocation::NormalizeOwnership {
            path: tmp.path().as_os_str().to_os_string(),
        };
        let argv = ArgVector::build(&tools(), &env, &inv);
        let path = tmp.path().to_str().unwrap();

        assert_eq!(argv.program(), Path::new("/bin/chown"));
        assert_eq!(argv.argv(), strings(&["chown", "root:root", path]).as_slice());
    }

    #[test]
    fn destroy_removes_recursively() {
        let (tmp, env) = managed();
        let inv = Invocation::Destroy {
            path: tmp.path().as_os_str().to_os_string(),
        };
        let argv = ArgVector::build(&tools(), &env, &inv);
        let path = tmp.path().to_str().unwrap();

        assert_eq!(argv.program(), Path::new("/bin/rm"));
        assert_eq!(argv.argv(), strings(&["rm", "-r", "-f", path]).as_slice());
    }

    #[test]
    fn arg0_never_comes_from_the_caller() {
        let (tmp, env) = managed();
        let inv = Invocation::EnterAndRun {
            path: tmp.path().as_os_str().to_os_string(),
            command: strings(&["/tmp/evil", "chroot"]),
        };
        let argv = ArgVector::build(&tools(), &env, &inv);
        assert_eq!(argv.arg0(), "chroot");
        assert_eq!(argv.program(), Path::new("/usr/sbin/chroot"));
    }

    #[test]
    fn display_prints_one_argument_per_line() {
        let (tmp, env) = managed();
        let inv = Invocation::Destroy {
            path: tmp.path().as_os_str().to_os_string(),
        };
        let rendered = ArgVector::build(&tools(), &env, &inv).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["rm", "-r", "-f", tmp.path().to_str().unwrap()]);
    }
}
