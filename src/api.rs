use crate::{
    constants::{GENERATE_DEMO_FAILED, HEALTH_MESSAGE, VERIFY_DEMO_FAILED, VERIFY_FAILED},
    error::Error,
    response::ErrorBody,
    service::relay::{credential_from_body, RelayService},
    state::RelayState,
};
use poem::{http::StatusCode, web::Data};
use poem_openapi::{
    payload::{Json, PlainText},
    ApiResponse, OpenApi,
};
use serde_json::Value;

pub struct RelayApi;

#[derive(ApiResponse)]
pub enum RelayResponse {
    /// Upstream response, passed through unchanged.
    #[oai(status = 200)]
    Ok(Json<Value>),
    /// Returned when no demo credential has been generated yet.
    #[oai(status = 400)]
    BadRequest(Json<ErrorBody>),
    /// Upstream call failed.
    #[oai(status = 500)]
    InternalError(Json<ErrorBody>),
    /// Upstream unreachable or rejected the request (detailed error mapping).
    #[oai(status = 502)]
    BadGateway(Json<ErrorBody>),
    /// Upstream timed out (detailed error mapping).
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorBody>),
}

impl RelayResponse {
    fn from_result(state: &RelayState, result: crate::error::Result<Value>, message: &str) -> Self {
        match result {
            Ok(body) => RelayResponse::Ok(Json(body)),
            Err(err) => RelayResponse::failure(&err, state, message),
        }
    }

    /// Upstream failures carry the endpoint's fixed message, never the
    /// underlying error.
    fn failure(err: &Error, state: &RelayState, message: &str) -> Self {
        let body = if err.is_upstream() {
            ErrorBody::new(message)
        } else {
            ErrorBody::new(err.to_string())
        };
        match err.status(state.error_mapping) {
            StatusCode::BAD_REQUEST => RelayResponse::BadRequest(Json(body)),
            StatusCode::BAD_GATEWAY => RelayResponse::BadGateway(Json(body)),
            StatusCode::GATEWAY_TIMEOUT => RelayResponse::GatewayTimeout(Json(body)),
            _ => RelayResponse::InternalError(Json(body)),
        }
    }
}

#[OpenApi]
impl RelayApi {
    /// Health check
    #[oai(path = "/", method = "get")]
    async fn health_check(&self) -> PlainText<String> {
        PlainText(HEALTH_MESSAGE.to_string())
    }

    /// Verify a caller supplied credential
    ///
    /// The `verifiableCredential` field of a json body is forwarded to the
    /// upstream verifier without local validation. A missing, empty or
    /// unparseable body is relayed as `{}`.
    #[oai(path = "/verify-credential", method = "post")]
    async fn verify_credential(&self, state: Data<&RelayState>, body: Vec<u8>) -> RelayResponse {
        let credential = credential_from_body(&body);
        let result = RelayService::verify_credential(state.0, credential).await;
        RelayResponse::from_result(state.0, result, VERIFY_FAILED)
    }

    /// Verify the last generated demo credential
    #[oai(path = "/verify-demo-vc", method = "get")]
    async fn verify_demo_credential(&self, state: Data<&RelayState>) -> RelayResponse {
        let result = RelayService::verify_demo_credential(state.0).await;
        RelayResponse::from_result(state.0, result, VERIFY_DEMO_FAILED)
    }

    /// Generate a demo credential
    ///
    /// Issues a credential for a fixed demo subject and stores it for
    /// `/verify-demo-vc`.
    #[oai(path = "/generate-demo-vc", method = "get")]
    async fn generate_demo_credential(&self, state: Data<&RelayState>) -> RelayResponse {
        let result = RelayService::generate_demo_credential(state.0).await;
        RelayResponse::from_result(state.0, result, GENERATE_DEMO_FAILED)
    }
}
