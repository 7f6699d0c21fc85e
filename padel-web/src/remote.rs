//! HTTP client for backend stored procedures.
use crate::dom;
use async_trait::async_trait;
use padel_core::{BackendConfig, RemoteError, RemoteProcedure};
use serde_json::Value;

/// Calls `POST {base}/rest/v1/rpc/{procedure}` with the params as the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RpcClient {
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

impl RpcClient {
    #[must_use]
    pub fn from_config(backend: &BackendConfig) -> Self {
        Self {
            base_url: backend.base_url.trim_end_matches('/').to_string(),
            anon_key: backend.anon_key.clone(),
            access_token: None,
        }
    }

    /// Authorise calls as the signed-in user instead of the anonymous role.
    #[must_use]
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub fn endpoint(&self, procedure: &str) -> String {
        format!("{}/rest/v1/rpc/{procedure}", self.base_url)
    }

    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        vec![
            ("apikey", self.anon_key.clone()),
            ("Authorization", format!("Bearer {bearer}")),
        ]
    }
}

/// Interpret a finished HTTP exchange.
///
/// # Errors
/// Non-2xx statuses become [`RemoteError::Status`]; bodies that are not JSON
/// become [`RemoteError::Decode`].
pub fn parse_response(status: u16, body: &str) -> Result<Value, RemoteError> {
    if !(200..300).contains(&status) {
        return Err(RemoteError::from_body(status, body));
    }
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| RemoteError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl RemoteProcedure for RpcClient {
    async fn call(&self, procedure: &str, params: &Value) -> Result<Value, RemoteError> {
        let body = serde_json::to_string(params).map_err(|e| RemoteError::Decode(e.to_string()))?;
        let (status, text) = dom::post_json(&self.endpoint(procedure), &self.headers(), &body)
            .await
            .map_err(|e| RemoteError::Transport(dom::js_error_message(&e)))?;
        log::debug!("{procedure} returned {status}");
        parse_response(status, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RpcClient {
        RpcClient::from_config(&BackendConfig {
            base_url: String::from("https://db.example.test/"),
            anon_key: String::from("anon"),
        })
    }

    #[test]
    fn endpoint_targets_rpc_path() {
        assert_eq!(
            client().endpoint("create_tournament"),
            "https://db.example.test/rest/v1/rpc/create_tournament"
        );
    }

    #[test]
    fn bearer_prefers_access_token() {
        let anon = client();
        assert!(anon.headers().contains(&("Authorization", String::from("Bearer anon"))));
        let user = client().with_access_token(Some(String::from("jwt")));
        assert!(user.headers().contains(&("Authorization", String::from("Bearer jwt"))));
        assert!(user.headers().contains(&("apikey", String::from("anon"))));
    }

    #[test]
    fn responses_map_to_results() {
        assert_eq!(parse_response(200, r#"{"id":3}"#).unwrap()["id"], 3);
        assert_eq!(parse_response(204, "").unwrap(), Value::Null);
        assert_eq!(
            parse_response(400, r#"{"message":"venue not found"}"#)
                .unwrap_err()
                .to_string(),
            "venue not found"
        );
        assert!(matches!(
            parse_response(200, "not json"),
            Err(RemoteError::Decode(_))
        ));
    }
}
