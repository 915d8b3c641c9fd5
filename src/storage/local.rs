use std::path::Path;

use crate::error::{PruneError, Result};
use crate::models::{ResourcesDictionary, SourcesIndex};

/// 本地文件读取
pub trait FileReader: Send + Sync {
    fn read_text(&self, path: &Path) -> std::io::Result<String>;
}

/// 直接读磁盘（相对路径以当前工作目录为准）
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileReader;

impl FileReader for FsFileReader {
    fn read_text(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// 读取并解析所有 source 的本地 JSON 文件。任何一个失败则整体失败。
pub fn load_local(sources: &SourcesIndex, reader: &dyn FileReader) -> Result<ResourcesDictionary> {
    let mut resources = ResourcesDictionary::new();

    for (locale, namespaces) in sources {
        let locale_resources = resources.entry(locale.clone()).or_default();

        for (namespace, source) in namespaces {
            let path = Path::new(&source.file);
            let content = reader
                .read_text(path)
                .map_err(|source| PruneError::FileAccess {
                    path: path.to_path_buf(),
                    source,
                })?;
            let tree = serde_json::from_str(&content).map_err(|source| PruneError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

            locale_resources.insert(namespace.clone(), tree);
            tracing::info!("Local resource loaded {}", source.file);
        }
    }

    Ok(resources)
}
