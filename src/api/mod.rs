pub mod client;
#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub use client::PhraseClient;

/// `DELETE /projects/{project_id}/keys` 的响应
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeysDeleteResponse {
    pub records_affected: u64,
}

/// 远端翻译管理服务
#[async_trait]
pub trait PhraseApi: Send + Sync {
    /// 下载某个 locale 在给定 tag 下的资源，返回原始 JSON 文本
    async fn download_locale(
        &self,
        project_id: &str,
        locale_id: &str,
        file_format: &str,
        tags: &str,
    ) -> Result<String, ApiError>;

    /// 按查询删除 key，`query` 形如 `name:a.b,c tags:web`
    async fn delete_keys(&self, project_id: &str, query: &str)
        -> Result<KeysDeleteResponse, ApiError>;
}

/// 构造删除查询：`name:<逗号连接的 key> tags:<namespace>`
pub fn delete_query(key_names: &[String], namespace: &str) -> String {
    format!("name:{} tags:{}", key_names.join(","), namespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_query_format() {
        let keys = vec!["home.details.calls_0".to_string(), "list.items".to_string()];
        assert_eq!(
            delete_query(&keys, "web"),
            "name:home.details.calls_0,list.items tags:web"
        );
    }
}
