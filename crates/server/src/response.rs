//! Uniform JSON response envelope.
//!
//! Every API response, success or failure, has the shape
//! `{ "success": bool, "message": string, "data": <payload> }`.

use serde::Serialize;
use serde_json::{Value, json};

/// JSON envelope wrapping every API payload.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

impl ApiResponse<Value> {
    /// Failure response. `data` is an empty object, matching the success
    /// shape so clients can always deserialize the same envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: json!({}),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_shape() {
        let resp = ApiResponse::ok("Cart cleared", json!({"removed": 2}));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Cart cleared");
        assert_eq!(value["data"]["removed"], 2);
    }

    #[test]
    fn test_error_envelope_has_empty_data() {
        let resp = ApiResponse::error("Product not found");
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["data"], json!({}));
    }
}
