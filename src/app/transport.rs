use crate::model::{OperationId, OperationResult, RequestPayload};
use reqwest::StatusCode;
use std::{error::Error as _, fmt, time::Duration};
use tracing::{debug, warn};

#[derive(Debug)]
pub enum TransportError {
    Network(String),
    Status { status: StatusCode, body: String },
    Malformed {
        endpoint: &'static str,
        source: serde_json::Error,
    },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(message) => f.write_str(message),
            TransportError::Status { status, body } => {
                let detail = if body.is_empty() {
                    status.canonical_reason().unwrap_or_default()
                } else {
                    body.as_str()
                };
                write!(f, "HTTP {}: {detail}", status.as_u16())
            }
            TransportError::Malformed { endpoint, source } => {
                write!(f, "unexpected response from {endpoint}: {source}")
            }
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Malformed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        let mut message = value.to_string();
        let mut cause = value.source();
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }
        TransportError::Network(message)
    }
}

/// Client for the remote computation service.
#[derive(Debug, Clone)]
pub struct TransportClient {
    base_url: String,
    http: reqwest::Client,
}

impl TransportClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent("prime-tui/0.1.0");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, operation: OperationId) -> String {
        format!("{}/{}", self.base_url, operation.endpoint())
    }

    /// Issues exactly one request. Every failure comes back as
    /// [`OperationResult::Error`].
    pub async fn invoke(
        &self,
        operation: OperationId,
        payload: &RequestPayload,
    ) -> OperationResult {
        let outcome = self.exchange(operation, payload).await;
        if let Err(err) = &outcome {
            warn!(endpoint = operation.endpoint(), error = %err, "request failed");
        }
        into_result(outcome)
    }

    async fn exchange(
        &self,
        operation: OperationId,
        payload: &RequestPayload,
    ) -> Result<OperationResult, TransportError> {
        let url = self.endpoint_url(operation);
        debug!(%url, ?payload, "posting request");

        let response = self.http.post(&url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let body = response.bytes().await?;
        OperationResult::decode(operation, &body).map_err(|source| TransportError::Malformed {
            endpoint: operation.endpoint(),
            source,
        })
    }
}

/// Folds a transport outcome into the single result shape.
pub fn into_result(outcome: Result<OperationResult, TransportError>) -> OperationResult {
    outcome.unwrap_or_else(|err| OperationResult::Error(err.to_string()))
}
