use async_trait::async_trait;

use super::{KeysDeleteResponse, PhraseApi};
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.phrase.com/v2";

/// 基于 reqwest 的 Phrase API 客户端。HTTP client 由调用方注入。
pub struct PhraseClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl PhraseClient {
    pub fn new(http: reqwest::Client, access_token: &str) -> Self {
        Self::with_base_url(http, access_token, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(http: reqwest::Client, access_token: &str, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// 非 2xx 响应转为 ApiError::Status
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl PhraseApi for PhraseClient {
    async fn download_locale(
        &self,
        project_id: &str,
        locale_id: &str,
        file_format: &str,
        tags: &str,
    ) -> Result<String, ApiError> {
        let url = format!(
            "{}/projects/{}/locales/{}/download",
            self.base_url, project_id, locale_id
        );
        tracing::debug!("GET {} (file_format: {}, tags: {})", url, file_format, tags);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .query(&[("file_format", file_format), ("tags", tags)])
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.text().await?)
    }

    async fn delete_keys(
        &self,
        project_id: &str,
        query: &str,
    ) -> Result<KeysDeleteResponse, ApiError> {
        let url = format!("{}/projects/{}/keys", self.base_url, project_id);
        tracing::debug!("DELETE {} (q: {})", url, query);

        let response = self
            .http
            .delete(&url)
            .header(reqwest::header::AUTHORIZATION, self.authorization())
            .query(&[("q", query)])
            .send()
            .await?;
        let response = check_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
