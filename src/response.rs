/*

Failure:
{
    "error": "Verification failed"
}
*/

use poem_openapi::Object;

/// Error payload returned by every relay endpoint. The message is fixed per
/// endpoint, upstream detail is never copied into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Object)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
