//! The reqwest-backed service client.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use algodrill_core::error::ServiceError;
use algodrill_core::model::ProblemKind;

/// Bounded request timeout; a slow service surfaces as an error, never as
/// an indefinite hang.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// HTTP client for the generation/evaluation service.
pub struct ServiceClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl ServiceClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        }
    }

    /// Request a freshly generated problem instance for `kind`.
    #[instrument(skip(self, body), fields(kind = %kind))]
    pub async fn generate<Req, Resp>(&self, kind: ProblemKind, body: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        self.post_json(&format!("/generate/{}", kind.as_path()), body)
            .await
    }

    /// Submit an answer together with its reconstruction parameters.
    #[instrument(skip(self, body), fields(kind = %kind))]
    pub async fn evaluate<Req, Resp>(&self, kind: ProblemKind, body: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        self.post_json(&format!("/evaluate/{}", kind.as_path()), body)
            .await
    }

    pub(crate) async fn post_json<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, ServiceError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::Timeout(self.timeout_secs)
                } else {
                    ServiceError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api { status, message });
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }
}
