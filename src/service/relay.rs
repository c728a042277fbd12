use crate::{
    constants::{DEMO_SUBJECT_DID, DEMO_SUBJECT_NAME},
    error::{Error, Result},
    model::{IssueCredentialRequest, VerifiableCredential},
    state::RelayState,
};
use serde_json::{json, Map, Value};
use uuid::Uuid;

pub struct RelayService;

/// Issuance request for the hardcoded demo subject.
pub fn demo_issue_request() -> IssueCredentialRequest {
    let mut claims = Map::new();
    claims.insert("name".to_string(), json!(DEMO_SUBJECT_NAME));
    IssueCredentialRequest {
        subject: DEMO_SUBJECT_DID.to_string(),
        claims,
    }
}

/// Pulls `verifiableCredential` out of a raw request body. The body is not
/// checked beyond being json; anything else counts as an absent field.
pub fn credential_from_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice::<Value>(body)
        .ok()?
        .get("verifiableCredential")
        .cloned()
}

impl RelayService {
    /// Forward a caller supplied credential for verification. A missing
    /// credential is left out of the forwarded body.
    #[tracing::instrument(
        name = "verify credential",
        skip(state, verifiable_credential),
        fields(request_id = %Uuid::new_v4())
    )]
    pub async fn verify_credential(
        state: &RelayState,
        verifiable_credential: Option<Value>,
    ) -> Result<Value> {
        let mut body = Map::new();
        if let Some(credential) = verifiable_credential {
            body.insert("verifiableCredential".to_string(), credential);
        }

        state
            .upstream
            .verify_credential(&Value::Object(body))
            .await
            .map_err(|e| {
                tracing::error!("Error verifying credential: {}", e);
                e
            })
    }

    /// Verify the credential stored by the last demo generation.
    #[tracing::instrument(
        name = "verify demo credential",
        skip(state),
        fields(request_id = %Uuid::new_v4())
    )]
    pub async fn verify_demo_credential(state: &RelayState) -> Result<Value> {
        let credential = state.demo_credential.current().await.ok_or_else(|| {
            tracing::warn!("demo credential requested before one was generated");
            Error::DemoCredentialUnset
        })?;

        state
            .upstream
            .verify_credential(&json!({ "credential": credential }))
            .await
            .map_err(|e| {
                tracing::error!("Error verifying demo credential: {}", e);
                e
            })
    }

    /// Issue a credential for the demo subject and keep it for later
    /// verification.
    #[tracing::instrument(
        name = "generate demo credential",
        skip(state),
        fields(request_id = %Uuid::new_v4())
    )]
    pub async fn generate_demo_credential(state: &RelayState) -> Result<Value> {
        let credential = state
            .upstream
            .issue_credential(&demo_issue_request())
            .await
            .map_err(|e| {
                tracing::error!("Error generating demo VC: {}", e);
                e
            })?;

        match VerifiableCredential::parse(&credential) {
            Some(vc) => tracing::info!(
                "demo credential issued by {} for {}",
                vc.issuer.id(),
                vc.credential_subject.id
            ),
            None => tracing::info!("demo credential issued in an unrecognised shape"),
        }

        state.demo_credential.store(credential.clone()).await;
        Ok(credential)
    }
}
