use crate::configuration::ErrorMapping;
use poem::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("upstream connection failed: {0}")]
    UpstreamConnect(#[source] reqwest::Error),
    #[error("upstream request timed out: {0}")]
    UpstreamTimeout(#[source] reqwest::Error),
    #[error("upstream responded with status {status}")]
    UpstreamRejected { status: u16 },
    #[error("upstream response is not valid json: {0}")]
    UpstreamMalformed(#[source] reqwest::Error),
    #[error("upstream request failed: {0}")]
    UpstreamRequest(#[source] reqwest::Error),
    #[error("failed to build http client: {0}")]
    HttpClient(#[source] reqwest::Error),
    #[error("No demo credential generated yet")]
    DemoCredentialUnset,
}
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Sorts a transport error from `send()` into the matching variant.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::UpstreamTimeout(err)
        } else if err.is_connect() {
            Error::UpstreamConnect(err)
        } else {
            Error::UpstreamRequest(err)
        }
    }

    pub fn is_upstream(&self) -> bool {
        !matches!(self, Error::DemoCredentialUnset | Error::HttpClient(_))
    }

    /// HTTP status reported to the caller under the given mapping.
    pub fn status(&self, mapping: ErrorMapping) -> StatusCode {
        match (self, mapping) {
            (Error::DemoCredentialUnset, _) => StatusCode::BAD_REQUEST,
            (_, ErrorMapping::Compatible) => StatusCode::INTERNAL_SERVER_ERROR,
            (Error::UpstreamTimeout(_), ErrorMapping::Detailed) => StatusCode::GATEWAY_TIMEOUT,
            (Error::HttpClient(_), ErrorMapping::Detailed) => StatusCode::INTERNAL_SERVER_ERROR,
            (_, ErrorMapping::Detailed) => StatusCode::BAD_GATEWAY,
        }
    }
}
