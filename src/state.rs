use crate::{
    configuration::{ErrorMapping, UpstreamSettings},
    error::Result,
    service::{demo::DemoCredentialSlot, upstream::UpstreamClient},
};

/// Everything a relay handler needs, handed to poem as shared data.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub upstream: UpstreamClient,
    pub demo_credential: DemoCredentialSlot,
    pub error_mapping: ErrorMapping,
}

impl RelayState {
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        Ok(Self {
            upstream: UpstreamClient::new(settings)?,
            demo_credential: DemoCredentialSlot::new(),
            error_mapping: settings.error_mapping,
        })
    }
}
