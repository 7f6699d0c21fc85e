//! Scripted stand-in for the backend's remote procedures.
use async_trait::async_trait;
use padel_core::{RemoteError, RemoteProcedure};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

/// Replays queued outcomes in order and records every call. Once the
/// script runs out every call succeeds with `{"ok": true}`.
#[derive(Debug, Default)]
pub struct ScriptedRemote {
    script: RefCell<VecDeque<Result<Value, RemoteError>>>,
    calls: RefCell<Vec<(String, Value)>>,
    latency: Duration,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn then(self, outcome: Result<Value, RemoteError>) -> Self {
        self.script.borrow_mut().push_back(outcome);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl RemoteProcedure for ScriptedRemote {
    async fn call(&self, procedure: &str, params: &Value) -> Result<Value, RemoteError> {
        self.calls
            .borrow_mut()
            .push((procedure.to_string(), params.clone()));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let next = self.script.borrow_mut().pop_front();
        log::debug!("scripted {procedure} -> {next:?}");
        next.unwrap_or_else(|| Ok(json!({ "ok": true })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_script_then_succeeds() {
        let remote = ScriptedRemote::new().then(Err(RemoteError::Status {
            status: 409,
            message: "profile already exists".to_string(),
        }));
        let first = remote.call("complete_user_onboarding", &json!({})).await;
        assert_eq!(first.unwrap_err().to_string(), "profile already exists");
        let second = remote.call("complete_user_onboarding", &json!({})).await;
        assert_eq!(second.unwrap(), json!({ "ok": true }));
        assert_eq!(remote.call_count(), 2);
    }
}
