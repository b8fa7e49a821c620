//! Wire types for the Feishu open API.

use serde::{Deserialize, Serialize};

/// Body for the tenant access token endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TenantTokenRequest {
    /// Feishu app id.
    pub app_id: String,

    /// Feishu app secret.
    pub app_secret: String,
}

/// Response from the tenant access token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantTokenResponse {
    /// Feishu status code, zero on success.
    pub code: i64,

    /// Human-readable status message.
    #[serde(default)]
    pub msg: String,

    /// The token, present when `code` is zero.
    #[serde(default)]
    pub tenant_access_token: Option<String>,
}

/// Body for creating one Bitable record.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRecordRequest {
    /// Field name to value map; keys must match the table's field names.
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Response from the Bitable record creation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordResponse {
    /// Feishu status code, zero on success.
    pub code: i64,

    /// Human-readable status message.
    #[serde(default)]
    pub msg: String,

    /// Created record payload, passed through untyped.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_parses_success_body() {
        let body = r#"{"code":0,"msg":"ok","tenant_access_token":"t-abc","expire":7200}"#;
        let parsed: TenantTokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code, 0);
        assert_eq!(parsed.tenant_access_token.as_deref(), Some("t-abc"));
    }

    #[test]
    fn token_response_parses_error_body_without_token() {
        let body = r#"{"code":99991663,"msg":"app not found"}"#;
        let parsed: TenantTokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code, 99991663);
        assert!(parsed.tenant_access_token.is_none());
    }

    #[test]
    fn record_request_serializes_field_map_as_object() {
        let mut fields = serde_json::Map::new();
        fields.insert(
            "原始OCR文本".to_string(),
            serde_json::Value::String("灯带 3.4 米".to_string()),
        );
        let body = serde_json::to_value(CreateRecordRequest { fields }).unwrap();
        assert_eq!(body["fields"]["原始OCR文本"], "灯带 3.4 米");
    }
}
