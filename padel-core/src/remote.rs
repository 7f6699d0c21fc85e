//! Remote procedure seam. The backend owns every business rule; the
//! client only ships a payload and reports what came back.
use async_trait::async_trait;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The procedure ran and rejected the call; `message` is shown as-is.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("unreadable response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Pull a human message out of an error body, falling back to the
    /// status line. Recognises `{"message": ...}` and `{"error": ...}`.
    #[must_use]
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|json| {
                ["message", "error_description", "error"]
                    .iter()
                    .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::Status { status, message }
    }
}

/// A named, parameterised operation executed by the backend.
#[async_trait(?Send)]
pub trait RemoteProcedure {
    /// Invoke `procedure` once with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] when the call fails or the procedure rejects it.
    async fn call(&self, procedure: &str, params: &Value) -> Result<Value, RemoteError>;
}
