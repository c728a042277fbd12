use crate::{
    configuration::UpstreamSettings,
    error::{Error, Result},
    model::IssueCredentialRequest,
};
use serde_json::Value;

pub const VERIFY_CREDENTIAL_PATH: &str = "verify-credential";
pub const ISSUE_CREDENTIAL_PATH: &str = "issue-credential";

/// Client for the external VC service. Every call is a single POST, there is
/// no retry.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::HttpClient)?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `POST <base>/verify-credential`; the body is forwarded as is.
    pub async fn verify_credential(&self, body: &Value) -> Result<Value> {
        self.post_json(VERIFY_CREDENTIAL_PATH, body).await
    }

    /// `POST <base>/issue-credential`
    pub async fn issue_credential(&self, request: &IssueCredentialRequest) -> Result<Value> {
        self.post_json(ISSUE_CREDENTIAL_PATH, request).await
    }

    async fn post_json<T>(&self, path: &str, body: &T) -> Result<Value>
    where
        T: serde::Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        tracing::debug!("relaying request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(Error::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamRejected {
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_timeout() {
                Error::UpstreamTimeout(e)
            } else {
                Error::UpstreamMalformed(e)
            }
        })
    }
}
