//
//  bucket-link
//  vcs/exec.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Subprocess execution for the VCS backends.
//!
//! Backends never spawn processes themselves; they go through a
//! [`CommandRunner`] so the parsing logic can be driven by canned output in
//! tests.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{LinkError, Result};

/// Runs a VCS executable and returns its standard output.
pub trait CommandRunner {
    /// Runs `program` with `args` and returns stdout decoded as UTF-8.
    ///
    /// A non-zero exit status must be reported as
    /// [`LinkError::CommandExecution`].
    fn run(&self, program: &str, args: &[&str]) -> Result<String>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for std::rc::Rc<T> {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        (**self).run(program, args)
    }
}

/// Runs commands as child processes with a fixed working directory.
///
/// # Example
///
/// ```rust,no_run
/// use bucket_link::vcs::{CommandRunner, ProcessRunner};
///
/// let runner = ProcessRunner::new("/path/to/repo");
/// let remotes = runner.run("git", &["remote", "-v"])?;
/// println!("{}", remotes);
/// # Ok::<(), bucket_link::LinkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    dir: PathBuf,
}

impl ProcessRunner {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command_line = render_command(program, args);
        tracing::debug!("Running `{}` in {}", command_line, self.dir.display());

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| LinkError::CommandExecution {
                command: command_line.clone(),
                exit_code: None,
                output: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
            tracing::debug!("`{}` exited with {}", command_line, output.status);
            return Err(LinkError::CommandExecution {
                command: command_line,
                exit_code: output.status.code(),
                output: if stderr.is_empty() { stdout } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Formats a program and its arguments as a single display string.
pub(crate) fn render_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted runner used by the backend tests.

    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    /// Replays canned output keyed by the rendered command line.
    ///
    /// Commands without a scripted response fail like a non-zero exit.
    #[derive(Default)]
    pub struct ScriptedRunner {
        responses: HashMap<String, std::result::Result<String, i32>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn ok(mut self, command: &str, stdout: &str) -> Self {
            self.responses
                .insert(command.to_string(), Ok(stdout.to_string()));
            self
        }

        pub fn fail(mut self, command: &str, code: i32) -> Self {
            self.responses.insert(command.to_string(), Err(code));
            self
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, program: &str, args: &[&str]) -> Result<String> {
            let command = render_command(program, args);
            self.calls.borrow_mut().push(command.clone());
            match self.responses.get(&command) {
                Some(Ok(stdout)) => Ok(stdout.clone()),
                Some(Err(code)) => Err(LinkError::CommandExecution {
                    command,
                    exit_code: Some(*code),
                    output: "scripted failure".to_string(),
                }),
                None => Err(LinkError::CommandExecution {
                    command,
                    exit_code: Some(255),
                    output: "unscripted command".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_command() {
        assert_eq!(
            render_command("git", &["blame", "-L", "3,3", "--", "src/lib.rs"]),
            "git blame -L 3,3 -- src/lib.rs"
        );
    }

    #[test]
    fn test_missing_program_is_command_execution_error() {
        let runner = ProcessRunner::new(std::env::temp_dir());
        let err = runner
            .run("bkt-definitely-not-a-real-program", &["status"])
            .unwrap_err();
        match err {
            LinkError::CommandExecution { exit_code, .. } => assert_eq!(exit_code, None),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
