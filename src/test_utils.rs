//! Test utilities shared across the crate
//!
//! This module provides common test helpers that can be used by both unit tests
//! in src/ and integration tests in tests/.

use crate::core::executor::{ProcessOutcome, ProcessRunner};
use async_trait::async_trait;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Process runner that records every invocation instead of spawning it
pub struct RecordingRunner {
    calls: Mutex<Vec<Vec<String>>>,
    envs: Mutex<Vec<Vec<(String, String)>>>,
    exit_code: i32,
    fail_when_contains: Option<String>,
    cancel_after: Option<usize>,
}

impl RecordingRunner {
    fn with_exit_code(exit_code: i32) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            envs: Mutex::new(Vec::new()),
            exit_code,
            fail_when_contains: None,
            cancel_after: None,
        }
    }

    /// Every invocation exits with status 0
    pub fn succeeding() -> Self {
        Self::with_exit_code(0)
    }

    /// Every invocation exits with `code`
    pub fn failing_with(code: i32) -> Self {
        Self::with_exit_code(code)
    }

    /// Invocations with an argument containing `needle` exit with status 1
    pub fn failing_when_contains(needle: &str) -> Self {
        Self {
            fail_when_contains: Some(needle.to_string()),
            ..Self::succeeding()
        }
    }

    /// Cancel the token passed to the runner once `count` invocations completed
    pub fn cancelling_after(count: usize) -> Self {
        Self {
            cancel_after: Some(count),
            ..Self::succeeding()
        }
    }

    /// Recorded argument vectors, in call order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Extra environment passed with each call
    pub fn envs(&self) -> Vec<Vec<(String, String)>> {
        self.envs.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(
        &self,
        argv: &[String],
        env: &[(String, String)],
        cancel: &CancellationToken,
    ) -> std::io::Result<ProcessOutcome> {
        let call_count = {
            let mut calls = self
                .calls
                .lock()
                .map_err(|_| std::io::Error::other("recording lock poisoned"))?;
            calls.push(argv.to_vec());
            calls.len()
        };
        if let Ok(mut envs) = self.envs.lock() {
            envs.push(env.to_vec());
        }

        if self.cancel_after == Some(call_count) {
            cancel.cancel();
        }

        let failed = self
            .fail_when_contains
            .as_deref()
            .is_some_and(|needle| argv.iter().any(|a| a.contains(needle)));

        Ok(ProcessOutcome::Exited {
            code: Some(if failed { 1 } else { self.exit_code }),
        })
    }
}
