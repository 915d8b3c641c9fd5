use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{KeysDeleteResponse, PhraseApi};
use crate::error::ApiError;

/// 内存中的 Phrase API，记录所有请求
#[derive(Default)]
pub struct FakeApi {
    downloads: HashMap<(String, String), String>,
    delete_responses: Mutex<VecDeque<Result<u64, u16>>>,
    pub download_calls: Mutex<Vec<(String, String, String, String)>>,
    pub delete_calls: Mutex<Vec<(String, String)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_download(mut self, locale_id: &str, tags: &str, body: serde_json::Value) -> Self {
        self.downloads
            .insert((locale_id.to_string(), tags.to_string()), body.to_string());
        self
    }

    pub fn with_raw_download(mut self, locale_id: &str, tags: &str, body: &str) -> Self {
        self.downloads
            .insert((locale_id.to_string(), tags.to_string()), body.to_string());
        self
    }

    /// 依次返回的删除结果；`Err(status)` 模拟失败。队列为空时返回查询中的 key 数量。
    pub fn with_delete_responses(self, responses: Vec<Result<u64, u16>>) -> Self {
        *self.delete_responses.lock().unwrap() = responses.into();
        self
    }

    pub fn delete_queries(&self) -> Vec<String> {
        self.delete_calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, q)| q.clone())
            .collect()
    }
}

fn key_count(query: &str) -> u64 {
    query
        .strip_prefix("name:")
        .and_then(|rest| rest.split(' ').next())
        .map(|names| names.split(',').count() as u64)
        .unwrap_or(0)
}

#[async_trait]
impl PhraseApi for FakeApi {
    async fn download_locale(
        &self,
        project_id: &str,
        locale_id: &str,
        file_format: &str,
        tags: &str,
    ) -> Result<String, ApiError> {
        self.download_calls.lock().unwrap().push((
            project_id.to_string(),
            locale_id.to_string(),
            file_format.to_string(),
            tags.to_string(),
        ));
        self.downloads
            .get(&(locale_id.to_string(), tags.to_string()))
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: format!("no locale {} with tags {}", locale_id, tags),
            })
    }

    async fn delete_keys(
        &self,
        project_id: &str,
        query: &str,
    ) -> Result<KeysDeleteResponse, ApiError> {
        self.delete_calls
            .lock()
            .unwrap()
            .push((project_id.to_string(), query.to_string()));
        match self.delete_responses.lock().unwrap().pop_front() {
            Some(Ok(records_affected)) => Ok(KeysDeleteResponse { records_affected }),
            Some(Err(status)) => Err(ApiError::Status {
                status,
                body: "delete failed".to_string(),
            }),
            None => Ok(KeysDeleteResponse {
                records_affected: key_count(query),
            }),
        }
    }
}
