use std::path::Path;

use crate::error::{PruneError, Result};
use crate::models::{Config, RawSource, Source, SourcesIndex, SUPPORTED_FILE_FORMAT};

/// 默认配置文件名
pub const DEFAULT_CONFIG_PATH: &str = ".phrase.yml";

/// 校验通过的配置
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedConfig {
    pub access_token: String,
    pub project_id: String,
    pub sources: SourcesIndex,
}

/// 读取 YAML 配置文件并校验
pub fn load_config(path: &Path) -> Result<ValidatedConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| PruneError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<ValidatedConfig> {
    let config: Config = serde_yaml::from_str(content)?;
    validate_config(&config)
}

/// 校验必填字段与文件格式，并按 locale → namespace 建立 source 索引。
/// 重复的 (locale, namespace) 以后出现者为准。
pub fn validate_config(config: &Config) -> Result<ValidatedConfig> {
    let phrase = config.phrase.clone().unwrap_or_default();

    let project_id = non_empty(phrase.project_id)
        .ok_or_else(|| invalid("Please provide `project_id` in Phrase config"))?;
    let access_token = non_empty(phrase.access_token)
        .ok_or_else(|| invalid("Please provide `access_token` in Phrase config"))?;

    let raw_sources = phrase
        .push
        .and_then(|push| push.sources)
        .ok_or_else(|| invalid("Please provide `push.sources` in Phrase config"))?;

    let mut sources = SourcesIndex::new();
    for raw in &raw_sources {
        let source = validate_source(raw)?;
        let previous = sources
            .entry(source.locale_id.clone())
            .or_default()
            .insert(source.tags.clone(), source.clone());
        if let Some(previous) = previous {
            tracing::warn!(
                "Duplicate push source (locale_id: {}, tags: {}), {} replaces {}",
                source.locale_id,
                source.tags,
                source.file,
                previous.file
            );
        }
    }

    Ok(ValidatedConfig {
        access_token,
        project_id,
        sources,
    })
}

fn validate_source(raw: &RawSource) -> Result<Source> {
    let params = &raw.params;
    let locale_label = params.locale_id.as_deref().unwrap_or("?");
    let tags_label = params.tags.as_deref().unwrap_or("?");
    let file_label = raw.file.as_deref().unwrap_or("?");

    let file = raw.file.clone().ok_or_else(|| {
        invalid(&format!(
            "Push source file not defined (locale_id: {}, tags: {})",
            locale_label, tags_label
        ))
    })?;
    let locale_id = params.locale_id.clone().ok_or_else(|| {
        invalid(&format!(
            "Push source locale_id not defined (file: {}, tags: {})",
            file_label, tags_label
        ))
    })?;
    let tags = params.tags.clone().ok_or_else(|| {
        invalid(&format!(
            "Push source tags not defined (file: {}, locale_id: {})",
            file_label, locale_label
        ))
    })?;

    match params.file_format.as_deref() {
        Some(SUPPORTED_FILE_FORMAT) => {}
        _ => {
            return Err(invalid(&format!(
                "Only {} format is supported (locale_id: {}, tags: {})",
                SUPPORTED_FILE_FORMAT, locale_id, tags
            )))
        }
    }

    Ok(Source {
        file,
        locale_id,
        tags,
        file_format: SUPPORTED_FILE_FORMAT.to_string(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn invalid(message: &str) -> PruneError {
    PruneError::ConfigValidation(message.to_string())
}
