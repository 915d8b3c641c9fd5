use futures::future::try_join_all;

use crate::api::PhraseApi;
use crate::error::{PruneError, Result};
use crate::models::{ResourceTree, ResourcesDictionary, Source, SourcesIndex};

/// 并发下载所有 source 的远端资源。结果按 (locale, namespace) 归档，完成顺序无关。
pub async fn load_remote<A: PhraseApi + ?Sized>(
    sources: &SourcesIndex,
    project_id: &str,
    api: &A,
) -> Result<ResourcesDictionary> {
    let downloads = sources
        .values()
        .flat_map(|namespaces| namespaces.values())
        .map(|source| download(source, project_id, api));
    let trees = try_join_all(downloads).await?;

    let mut resources = ResourcesDictionary::new();
    for locale in sources.keys() {
        resources.entry(locale.clone()).or_default();
    }
    for (source, tree) in trees {
        resources
            .entry(source.locale_id.clone())
            .or_default()
            .insert(source.tags.clone(), tree);
    }
    Ok(resources)
}

async fn download<'a, A: PhraseApi + ?Sized>(
    source: &'a Source,
    project_id: &str,
    api: &A,
) -> Result<(&'a Source, ResourceTree)> {
    let fetch_error = |e| PruneError::RemoteFetch {
        locale_id: source.locale_id.clone(),
        tags: source.tags.clone(),
        source: e,
    };

    let body = api
        .download_locale(project_id, &source.locale_id, &source.file_format, &source.tags)
        .await
        .map_err(fetch_error)?;
    let tree = serde_json::from_str(&body).map_err(|e| fetch_error(e.into()))?;

    tracing::info!(
        "Remote resource loaded (locale_id: {}, tags: {})",
        source.locale_id,
        source.tags
    );
    Ok((source, tree))
}
