use crate::constants::{DEFAULT_PORT, DEFAULT_UPSTREAM_URL};
use serde_aux::field_attributes::deserialize_number_from_string;
use std::{env, time::Duration};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub upstream: UpstreamSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSettings {
    /// Base address of the external VC service, e.g. `http://localhost:3000`.
    pub base_url: String,
    #[serde(default)]
    pub timeout_milliseconds: Option<u64>,
    #[serde(default)]
    pub error_mapping: ErrorMapping,
}

impl UpstreamSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_milliseconds: None,
            error_mapping: ErrorMapping::default(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }
}

/// How upstream failures are reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorMapping {
    /// Every upstream failure is a 500.
    Compatible,
    /// 502 for unreachable/rejecting upstreams, 504 for timeouts.
    Detailed,
}

impl Default for ErrorMapping {
    fn default() -> Self {
        ErrorMapping::Compatible
    }
}

/// Reads settings from defaults, an optional `configuration` file in the working
/// directory and `APP_`-prefixed environment variables. A bare `PORT` wins over
/// everything else for the listening port.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let mut settings = config::Config::default();
    settings.set_default("application.host", "127.0.0.1")?;
    settings.set_default("application.port", DEFAULT_PORT as i64)?;
    settings.set_default("upstream.base_url", DEFAULT_UPSTREAM_URL)?;
    settings.set_default("upstream.error_mapping", "compatible")?;

    settings.merge(config::File::with_name("configuration").required(false))?;
    // e.g. `APP_UPSTREAM__BASE_URL=http://vc-service:3000`
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    if let Ok(port) = env::var("PORT") {
        settings.set("application.port", port)?;
    }

    settings.try_into()
}
