pub mod deleter;
pub mod flatten;
pub mod reconcile;

use crate::api::PhraseApi;
use crate::config::ValidatedConfig;
use crate::error::Result;
use crate::models::{join_key_path, NamespaceKeySet};
use crate::storage::{load_local, load_remote, FileReader, FsFileReader, ResourceStore};

pub use deleter::{BatchOutcome, DeletionReport, RemoteKeyDeleter, DELETE_BATCH_SIZE};
pub use flatten::{flatten_keys, flatten_keys_with_prefix};
pub use reconcile::{key_count, unmentioned_keys};

/// 一次清理的结果。dry-run 时没有删除报告。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub unmentioned: NamespaceKeySet,
    pub report: Option<DeletionReport>,
}

impl PruneSummary {
    pub fn unmentioned_count(&self) -> usize {
        key_count(&self.unmentioned)
    }

    /// dry-run 固定为 0
    pub fn records_affected(&self) -> u64 {
        self.report
            .as_ref()
            .map_or(0, DeletionReport::records_affected)
    }
}

/// 清理远端多余 key：读取本地与远端资源，比较后删除（或在 dry-run 下只报告）
pub struct Pruner<A: PhraseApi> {
    config: ValidatedConfig,
    api: A,
    reader: Box<dyn FileReader>,
    resources: ResourceStore,
    batch_size: usize,
}

impl<A: PhraseApi> Pruner<A> {
    pub fn new(config: ValidatedConfig, api: A) -> Self {
        Self {
            config,
            api,
            reader: Box::new(FsFileReader),
            resources: ResourceStore::default(),
            batch_size: DELETE_BATCH_SIZE,
        }
    }

    pub fn with_reader(mut self, reader: impl FileReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    /// 先读本地，再读远端
    pub async fn read_resources(&mut self) -> Result<()> {
        self.read_local_resources()?;
        self.read_remote_resources().await
    }

    /// 失败时保留原有内容，不留下部分结果
    pub fn read_local_resources(&mut self) -> Result<()> {
        let local = load_local(&self.config.sources, self.reader.as_ref())?;
        self.resources.replace_local(local);
        Ok(())
    }

    pub async fn read_remote_resources(&mut self) -> Result<()> {
        let remote = load_remote(&self.config.sources, &self.config.project_id, &self.api).await?;
        self.resources.replace_remote(remote);
        Ok(())
    }

    /// 远端存在而本地任何 locale 都没有的 key
    pub fn get_remote_unmentioned_keys(&self) -> NamespaceKeySet {
        unmentioned_keys(
            self.resources.local(),
            self.resources.remote(),
            &self.config.sources,
        )
    }

    /// 返回远端报告的受影响记录总数
    pub async fn delete_remote_keys(&self, keys_by_namespace: &NamespaceKeySet) -> Result<u64> {
        let report = self.delete_remote_keys_with_report(keys_by_namespace).await?;
        Ok(report.records_affected())
    }

    pub async fn delete_remote_keys_with_report(
        &self,
        keys_by_namespace: &NamespaceKeySet,
    ) -> Result<DeletionReport> {
        RemoteKeyDeleter::new(&self.api, &self.config.project_id)
            .with_batch_size(self.batch_size)
            .delete_keys(keys_by_namespace)
            .await
    }

    /// 读取资源并清理。dry-run 只列出多余 key，固定返回 0。
    pub async fn prune_remote_resources(&mut self, dry_run: bool) -> Result<u64> {
        Ok(self.prune(dry_run).await?.records_affected())
    }

    /// 同 `prune_remote_resources`，但返回多余 key 与各批次结果
    pub async fn prune(&mut self, dry_run: bool) -> Result<PruneSummary> {
        self.read_resources().await?;
        let unmentioned = self.get_remote_unmentioned_keys();

        if !dry_run {
            let report = self.delete_remote_keys_with_report(&unmentioned).await?;
            return Ok(PruneSummary {
                unmentioned,
                report: Some(report),
            });
        }

        for (namespace, keys) in &unmentioned {
            for key in keys {
                tracing::info!(
                    "Unmentioned key found \"{}:{}\"",
                    namespace,
                    join_key_path(key)
                );
            }
        }
        tracing::info!(
            "{} unmentioned keys found in remote resources. Pass --dry-run false to apply changes.",
            key_count(&unmentioned)
        );
        Ok(PruneSummary {
            unmentioned,
            report: None,
        })
    }
}
