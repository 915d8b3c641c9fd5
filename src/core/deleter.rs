use crate::api::{delete_query, PhraseApi};
use crate::error::{PruneError, Result};
use crate::models::{join_key_path, NamespaceKeySet};

/// 单次删除请求的 key 上限，一次删除全部会被远端拒绝
pub const DELETE_BATCH_SIZE: usize = 50;

/// 一个已成功的删除批次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub namespace: String,
    pub key_names: Vec<String>,
    pub records_affected: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub batches: Vec<BatchOutcome>,
}

impl DeletionReport {
    pub fn records_affected(&self) -> u64 {
        self.batches.iter().map(|b| b.records_affected).sum()
    }

    pub fn keys_requested(&self) -> usize {
        self.batches.iter().map(|b| b.key_names.len()).sum()
    }
}

/// 分批删除远端 key。
///
/// 批次严格串行：上一批响应返回后才发下一批。某批失败时立即返回
/// `RemoteDelete`，之前成功的批次已在远端生效，不会回滚。
pub struct RemoteKeyDeleter<'a, A: PhraseApi + ?Sized> {
    api: &'a A,
    project_id: &'a str,
    batch_size: usize,
}

impl<'a, A: PhraseApi + ?Sized> RemoteKeyDeleter<'a, A> {
    pub fn new(api: &'a A, project_id: &'a str) -> Self {
        Self {
            api,
            project_id,
            batch_size: DELETE_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub async fn delete_keys(&self, keys_by_namespace: &NamespaceKeySet) -> Result<DeletionReport> {
        let mut report = DeletionReport::default();

        for (namespace, keys) in keys_by_namespace {
            if keys.is_empty() {
                continue;
            }

            for batch in keys.chunks(self.batch_size) {
                let key_names: Vec<String> = batch.iter().map(|k| join_key_path(k)).collect();
                let query = delete_query(&key_names, namespace);
                tracing::debug!(
                    "Deleting {} keys in namespace {}",
                    key_names.len(),
                    namespace
                );

                let response = self
                    .api
                    .delete_keys(self.project_id, &query)
                    .await
                    .map_err(|source| PruneError::RemoteDelete {
                        namespace: namespace.clone(),
                        keys: key_names.clone(),
                        source,
                    })?;

                for name in &key_names {
                    tracing::info!("Deleted key \"{}:{}\"", namespace, name);
                }
                report.batches.push(BatchOutcome {
                    namespace: namespace.clone(),
                    key_names,
                    records_affected: response.records_affected,
                });
            }
        }

        tracing::info!(
            "{} keys deleted in remote resources",
            report.records_affected()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::models::KeyPath;

    fn path(segments: &[&str]) -> KeyPath {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn many_keys(count: usize) -> Vec<KeyPath> {
        (0..count).map(|i| path(&["group", &format!("key_{}", i)])).collect()
    }

    #[tokio::test]
    async fn test_batches_of_fifty() {
        let api = FakeApi::new().with_delete_responses(vec![Ok(50), Ok(48), Ok(20)]);
        let mut keys = NamespaceKeySet::new();
        keys.insert("web".to_string(), many_keys(120));

        let report = RemoteKeyDeleter::new(&api, "PROJECT_ID")
            .delete_keys(&keys)
            .await
            .unwrap();

        let sizes: Vec<usize> = report.batches.iter().map(|b| b.key_names.len()).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
        assert_eq!(report.records_affected(), 118);
        assert_eq!(report.keys_requested(), 120);

        let queries = api.delete_queries();
        assert_eq!(queries.len(), 3);
        assert!(queries[0].starts_with("name:group.key_0,group.key_1,"));
        assert!(queries[2].ends_with("group.key_119 tags:web"));
        assert!(api
            .delete_calls
            .lock()
            .unwrap()
            .iter()
            .all(|(project, _)| project == "PROJECT_ID"));
    }

    #[tokio::test]
    async fn test_one_request_per_namespace() {
        let api = FakeApi::new().with_delete_responses(vec![Ok(4), Ok(1)]);
        let mut keys = NamespaceKeySet::new();
        keys.insert(
            "web".to_string(),
            vec![
                path(&["home", "details", "calls_0"]),
                path(&["home", "details", "calls_1"]),
                path(&["home", "details", "calls_2"]),
                path(&["list", "items"]),
            ],
        );
        keys.insert("mail".to_string(), vec![path(&["foo"])]);

        let report = RemoteKeyDeleter::new(&api, "PROJECT_ID")
            .delete_keys(&keys)
            .await
            .unwrap();

        assert_eq!(report.records_affected(), 5);
        assert_eq!(
            api.delete_queries(),
            vec![
                "name:home.details.calls_0,home.details.calls_1,home.details.calls_2,list.items tags:web"
                    .to_string(),
                "name:foo tags:mail".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_namespaces_skipped() {
        let api = FakeApi::new();
        let mut keys = NamespaceKeySet::new();
        keys.insert("web".to_string(), vec![]);
        keys.insert("mail".to_string(), vec![]);

        let report = RemoteKeyDeleter::new(&api, "P").delete_keys(&keys).await.unwrap();
        assert_eq!(report, DeletionReport::default());
        assert!(api.delete_queries().is_empty());
    }

    #[tokio::test]
    async fn test_failed_batch_stops_remaining() {
        let api = FakeApi::new().with_delete_responses(vec![Ok(3), Err(500)]);
        let mut keys = NamespaceKeySet::new();
        keys.insert("web".to_string(), many_keys(7));

        let err = RemoteKeyDeleter::new(&api, "P")
            .with_batch_size(3)
            .delete_keys(&keys)
            .await
            .unwrap_err();

        match err {
            PruneError::RemoteDelete {
                namespace, keys, ..
            } => {
                assert_eq!(namespace, "web");
                assert_eq!(keys, vec!["group.key_3", "group.key_4", "group.key_5"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        // 第一批已发出且不回滚，第三批未发出
        assert_eq!(api.delete_queries().len(), 2);
    }

    #[tokio::test]
    async fn test_zero_batch_size_clamped() {
        let api = FakeApi::new();
        let mut keys = NamespaceKeySet::new();
        keys.insert("web".to_string(), many_keys(2));

        let report = RemoteKeyDeleter::new(&api, "P")
            .with_batch_size(0)
            .delete_keys(&keys)
            .await
            .unwrap();
        assert_eq!(report.batches.len(), 2);
        assert_eq!(report.records_affected(), 2);
    }
}
