use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 唯一支持的文件格式
pub const SUPPORTED_FILE_FORMAT: &str = "i18next";

/// `.phrase.yml` 的原始结构。字段均为可选，由校验步骤给出具体错误。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub phrase: Option<PhraseConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PhraseConfig {
    pub access_token: Option<String>,
    pub project_id: Option<String>,
    pub push: Option<PushConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PushConfig {
    pub sources: Option<Vec<RawSource>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawSource {
    pub file: Option<String>,
    #[serde(default)]
    pub params: RawSourceParams,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawSourceParams {
    pub locale_id: Option<String>,
    pub file_format: Option<String>,
    pub tags: Option<String>,
}

/// 一个 (locale, namespace) 资源：本地文件 + 远端下载参数。校验后不可变。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Source {
    pub file: String,
    pub locale_id: String,
    /// Phrase 的 tag，同时作为 namespace
    pub tags: String,
    pub file_format: String,
}

/// 叶子节点的路径，例如 `["home", "details", "calls_0"]`
pub type KeyPath = Vec<String>;

/// namespace → 去重后的 KeyPath 序列，namespace 按配置中首次出现的顺序排列
pub type NamespaceKeySet = IndexMap<String, Vec<KeyPath>>;

/// 单个资源文件或远端下载的内容
pub type ResourceTree = serde_json::Value;

/// locale → namespace → ResourceTree
pub type ResourcesDictionary = IndexMap<String, IndexMap<String, ResourceTree>>;

/// locale → namespace → Source，保持配置文件中的顺序
pub type SourcesIndex = IndexMap<String, IndexMap<String, Source>>;

/// `["a", "b"]` → `"a.b"`
pub fn join_key_path(path: &[String]) -> String {
    path.join(".")
}
