use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Typed view of a credential returned by the upstream issuer. The relay never
/// builds or checks one; payloads are forwarded as raw json and this view is
/// only used for logging.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerifiableCredential {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub issuer: Issuer,
    pub issuance_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    pub credential_subject: CredentialSubject,
    pub proof: Proof,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum Issuer {
    Id(String),
    Object {
        id: String,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
}

impl Issuer {
    pub fn id(&self) -> &str {
        match self {
            Issuer::Id(id) => id,
            Issuer::Object { id, .. } => id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CredentialSubject {
    pub id: String,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub created: DateTime<Utc>,
    pub verification_method: String,
    pub proof_purpose: String,
    // jws, proofValue, ... depending on the signature suite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerifiableCredential {
    /// Returns the typed view when `value` has the expected shape.
    pub fn parse(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// Body of an issuance request sent upstream.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IssueCredentialRequest {
    pub subject: String,
    pub claims: Map<String, Value>,
}
