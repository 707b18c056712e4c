use std::fmt;
use std::process::{Command, ExitStatus};

use thiserror::Error;

/// Characters that carry meaning for a shell; never valid in partition names or node lists
const SHELL_METACHARACTERS: &[char] = &[
    ';', '&', '|', '$', '`', '<', '>', '(', ')', '{', '}', '\'', '"', '\\', '*', '?', '!', '~',
    '#',
];

#[derive(Debug, Error)]
pub enum QueryError {
    /// The command ran but exited unsuccessfully
    #[error("`{command}` failed with {status}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
    /// The command could not be started at all
    #[error("failed to execute `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` produced output that is not valid UTF-8")]
    Encoding { command: String },
    /// An argument was refused before anything was executed
    #[error("refusing to pass {argument:?} to scontrol: {reason}")]
    InvalidArgument {
        argument: String,
        reason: &'static str,
    },
}

impl QueryError {
    /// Command line that was attempted, if any
    pub fn command(&self) -> Option<&str> {
        match self {
            QueryError::Failed { command, .. }
            | QueryError::Spawn { command, .. }
            | QueryError::Encoding { command } => Some(command.as_str()),
            QueryError::InvalidArgument { .. } => None,
        }
    }

    /// Exit status of a command that ran but failed
    pub fn status(&self) -> Option<&str> {
        match self {
            QueryError::Failed { status, .. } => Some(status.as_str()),
            _ => None,
        }
    }

    /// Diagnostic text captured from the command
    pub fn diagnostics(&self) -> String {
        match self {
            QueryError::Failed { stderr, .. } => stderr.clone(),
            QueryError::Spawn { source, .. } => source.to_string(),
            QueryError::Encoding { .. } | QueryError::InvalidArgument { .. } => self.to_string(),
        }
    }
}

/// An external command as a program and a vector of discrete arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub program: String,
    pub args: Vec<String>,
}

impl Query {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Formats the query as the command line an operator would type
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }

        Ok(())
    }
}

/// Exit status and captured streams of a finished command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Captured {
    /// `None` on success, otherwise a description of the exit status
    pub failure: Option<String>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Captured {
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }

    /// Converts the captured output into text, failing on unsuccessful exits
    pub fn into_stdout(self, query: &Query) -> Result<String, QueryError> {
        if let Some(status) = self.failure {
            return Err(QueryError::Failed {
                command: query.to_string(),
                status,
                stderr: String::from_utf8_lossy(&self.stderr).into_owned(),
            });
        }

        String::from_utf8(self.stdout).map_err(|_| QueryError::Encoding {
            command: query.to_string(),
        })
    }
}

/// Runs queries synchronously; waits for as long as the command takes
pub trait Executor {
    fn execute(&self, query: &Query) -> Result<Captured, QueryError>;
}

/// Runs queries as child processes, without involving a shell
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&self, query: &Query) -> Result<Captured, QueryError> {
        log::debug!("executing `{}`", query);

        let output = Command::new(&query.program)
            .args(&query.args)
            .output()
            .map_err(|source| QueryError::Spawn {
                command: query.to_string(),
                source,
            })?;

        Ok(Captured {
            failure: describe_failure(output.status),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

fn describe_failure(status: ExitStatus) -> Option<String> {
    if status.success() {
        None
    } else {
        Some(status.to_string())
    }
}

/// Checks that a partition name or node list is safe to pass as an argument
pub fn validate_argument(value: &str) -> Result<&str, QueryError> {
    let reason = if value.is_empty() {
        Some("value is empty")
    } else if value.starts_with('-') {
        Some("value would be interpreted as an option")
    } else if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("value contains whitespace or control characters")
    } else if value.contains(SHELL_METACHARACTERS) {
        Some("value contains shell metacharacters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(QueryError::InvalidArgument {
            argument: value.to_string(),
            reason,
        }),
        None => Ok(value),
    }
}
