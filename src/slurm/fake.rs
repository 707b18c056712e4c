//! Scripted stand-in for `scontrol`
use std::cell::RefCell;
use std::collections::HashMap;

use super::query::{Captured, Executor, Query, QueryError};

#[derive(Debug, Default)]
pub struct FakeExecutor {
    responses: HashMap<String, Captured>,
    /// Queries executed so far
    pub calls: RefCell<Vec<Query>>,
}

impl FakeExecutor {
    /// Responds to `command` with `stdout` and a successful exit
    pub fn ok(mut self, command: &str, stdout: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            Captured {
                failure: None,
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            },
        );
        self
    }

    /// Responds to `command` with `stderr` and exit status 1
    pub fn fail(mut self, command: &str, stderr: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            Captured {
                failure: Some("exit status: 1".to_string()),
                stdout: Vec::new(),
                stderr: stderr.as_bytes().to_vec(),
            },
        );
        self
    }
}

impl Executor for FakeExecutor {
    fn execute(&self, query: &Query) -> Result<Captured, QueryError> {
        let command = query.to_string();
        self.calls.borrow_mut().push(query.clone());

        self.responses
            .get(&command)
            .cloned()
            .ok_or_else(|| QueryError::Spawn {
                command,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no scripted response"),
            })
    }
}
