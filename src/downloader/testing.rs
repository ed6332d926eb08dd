// Scripted CommandRunner for orchestration tests

use std::collections::VecDeque;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::errors::DownloadError;
use super::exec::CommandRunner;

/// One scripted invocation result.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    Exit {
        code: i32,
        stdout: &'static str,
        stderr: &'static str,
    },
    TimedOut,
}

impl ScriptedOutcome {
    pub fn ok() -> Self {
        Self::Exit {
            code: 0,
            stdout: "",
            stderr: "",
        }
    }

    pub fn fail(stderr: &'static str) -> Self {
        Self::Exit {
            code: 1,
            stdout: "",
            stderr,
        }
    }
}

/// What the orchestrator actually asked for.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

/// Replays a fixed script of outcomes and records every invocation.
/// Unscripted invocations fail with exit code 1.
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    script: Mutex<VecDeque<ScriptedOutcome>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new(outcomes: Vec<ScriptedOutcome>) -> Self {
        Self {
            inner: Arc::new(Inner {
                script: Mutex::new(outcomes.into()),
                invocations: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.inner.invocations.lock().unwrap().clone()
    }

    pub fn invocation_count(&self) -> usize {
        self.inner.invocations.lock().unwrap().len()
    }
}

pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout_secs: u64,
    ) -> Result<Output, DownloadError> {
        self.inner.invocations.lock().unwrap().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            timeout_secs,
        });

        match self.inner.script.lock().unwrap().pop_front() {
            Some(ScriptedOutcome::Exit { code, stdout, stderr }) => Ok(Output {
                status: exit_status(code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            }),
            Some(ScriptedOutcome::TimedOut) => Err(DownloadError::Timeout {
                seconds: timeout_secs,
            }),
            None => Ok(Output {
                status: exit_status(1),
                stdout: Vec::new(),
                stderr: b"ERROR: unscripted invocation".to_vec(),
            }),
        }
    }
}
