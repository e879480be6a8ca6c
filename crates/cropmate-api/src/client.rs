//! The single request-dispatch pipeline shared by every domain request
//! function.
//!
//! Before dispatch, a fresh token snapshot is taken from the credential store
//! and attached as a bearer credential when present; requests without a token
//! proceed unauthenticated. After dispatch, the response is decoded into the
//! shared error taxonomy exactly once, and a 401 on an intercepted route
//! clears the session through the hub.

use cropmate_core::config::ClientConfig;
use cropmate_core::error::{CropmateError, Result};
use cropmate_core::session::SessionHub;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// How a 401 response is routed.
///
/// Normal calls are intercepted: the session is cleared and the caller sees
/// `Unauthorized`. Login and register pass the 401 through untouched, since
/// there was no session to invalidate and clearing would loop the user
/// through the login surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthFailurePolicy {
    Intercept,
    PassThrough,
}

/// The backend's error envelope, decoded once at this boundary.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    fields: Option<BTreeMap<String, String>>,
}

/// HTTP client for the advisory service.
#[derive(Clone)]
pub struct AdvisoryClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) hub: Arc<SessionHub>,
}

impl AdvisoryClient {
    /// Creates a client from configuration, sharing the given session hub.
    pub fn new(config: &ClientConfig, hub: Arc<SessionHub>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CropmateError::network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            hub,
        })
    }

    pub fn hub(&self) -> &Arc<SessionHub> {
        &self.hub
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attaches the stored token as a bearer credential when one is present.
    pub(crate) fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.hub.current_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and classifies any failure.
    ///
    /// Returns the raw response only on 2xx; every other outcome becomes one
    /// of the tagged error variants. Callers never re-parse error bodies.
    pub(crate) async fn execute(
        &self,
        builder: RequestBuilder,
        policy: AuthFailurePolicy,
    ) -> Result<Response> {
        let response = builder.send().await.map_err(classify_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let envelope: ErrorEnvelope = serde_json::from_str(&body).unwrap_or_default();
        let message = envelope
            .message
            .or(envelope.error)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        match status {
            StatusCode::UNAUTHORIZED => {
                if policy == AuthFailurePolicy::Intercept {
                    // Exactly one clear per failing request; the retry runs
                    // unauthenticated and is not intercepted again here.
                    tracing::warn!(target: "api", "Received 401, invalidating session");
                    self.hub.invalidate();
                }
                Err(CropmateError::unauthorized(message))
            }
            StatusCode::BAD_REQUEST => match envelope.fields {
                Some(fields) if !fields.is_empty() => {
                    Err(CropmateError::validation(message, fields))
                }
                _ => Err(CropmateError::server(status.as_u16(), message)),
            },
            StatusCode::CONFLICT => Err(CropmateError::conflict(message)),
            _ => Err(CropmateError::server(status.as_u16(), message)),
        }
    }

    /// Decodes a 2xx body into the expected shape.
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| CropmateError::decode(e.to_string()))
    }
}

/// Dispatch-level failures (unreachable host, timeout) all classify as
/// "cannot connect"; retry happens only on explicit user resubmission.
fn classify_transport_error(err: reqwest::Error) -> CropmateError {
    if err.is_timeout() {
        CropmateError::network("request timed out")
    } else {
        CropmateError::network(err.to_string())
    }
}
