//! Feishu Bitable client.
//!
//! Pushes raw OCR text into a Bitable table so automations attached to
//! the table can take over from there.

use std::time::Duration;

use anyhow::{Context, Result};
use quotescan_records::{
    CreateRecordRequest, CreateRecordResponse, TenantTokenRequest, TenantTokenResponse,
};
use tracing::{debug, info};

const TENANT_TOKEN_URL: &str =
    "https://open.feishu.cn/open-apis/auth/v3/tenant_access_token/internal";
const BITABLE_BASE_URL: &str = "https://open.feishu.cn/open-apis/bitable/v1";

/// Connection settings for one Bitable table.
#[derive(Debug, Clone)]
pub struct FeishuConfig {
    /// Feishu app id.
    pub app_id: String,

    /// Feishu app secret.
    pub app_secret: String,

    /// Bitable app token (Base ID).
    pub base_app_token: String,

    /// Bitable table id.
    pub table_id: String,

    /// Name of the raw-text column, exactly as the table spells it.
    pub raw_text_field: String,
}

/// Client for the Feishu open API.
pub struct FeishuClient {
    config: FeishuConfig,
    http: reqwest::Client,
}

impl FeishuClient {
    /// Create a client with the API timeout applied.
    pub fn new(config: FeishuConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, http })
    }

    /// Fetch a tenant access token, the short-lived pass every table call
    /// needs.
    async fn tenant_access_token(&self) -> Result<String> {
        let request = TenantTokenRequest {
            app_id: self.config.app_id.clone(),
            app_secret: self.config.app_secret.clone(),
        };

        let response = self
            .http
            .post(TENANT_TOKEN_URL)
            .json(&request)
            .send()
            .await
            .context("Tenant token request failed")?;

        let body: TenantTokenResponse = response
            .json()
            .await
            .context("Failed to parse tenant token response")?;

        if body.code != 0 {
            anyhow::bail!("Tenant token request rejected: {} - {}", body.code, body.msg);
        }

        body.tenant_access_token
            .context("Tenant token response carried no token")
    }

    /// Append one record whose raw-text field holds `raw_text`.
    pub async fn create_record(&self, raw_text: &str) -> Result<serde_json::Value> {
        let token = self.tenant_access_token().await?;
        debug!("Obtained tenant access token");

        let url = format!(
            "{}/apps/{}/tables/{}/records",
            BITABLE_BASE_URL, self.config.base_app_token, self.config.table_id
        );

        let mut fields = serde_json::Map::new();
        fields.insert(
            self.config.raw_text_field.clone(),
            serde_json::Value::String(raw_text.to_string()),
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {token}"))
            .json(&CreateRecordRequest { fields })
            .send()
            .await
            .context("Record creation request failed")?;

        let body: CreateRecordResponse = response
            .json()
            .await
            .context("Failed to parse record creation response")?;

        if body.code != 0 {
            anyhow::bail!("Record creation rejected: {} - {}", body.code, body.msg);
        }

        info!("Record created in table {}", self.config.table_id);
        Ok(body.data.unwrap_or(serde_json::Value::Null))
    }
}
