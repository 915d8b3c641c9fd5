use std::path::PathBuf;

/// 远端 Phrase API 调用失败
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    ConfigValidation(String),

    #[error("cannot read file {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to download remote resource (locale_id: {locale_id}, tags: {tags}): {source}")]
    RemoteFetch {
        locale_id: String,
        tags: String,
        #[source]
        source: ApiError,
    },

    /// 之前已成功的批次不会回滚
    #[error("failed to delete keys in namespace {namespace} ({}): {source}", .keys.join(","))]
    RemoteDelete {
        namespace: String,
        keys: Vec<String>,
        #[source]
        source: ApiError,
    },
}

pub type Result<T> = std::result::Result<T, PruneError>;
