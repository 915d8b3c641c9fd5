use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use super::flatten::flatten_keys;
use crate::models::{KeyPath, NamespaceKeySet, ResourcesDictionary, SourcesIndex};

static EMPTY_TREE: Value = Value::Null;

/// 去重的 KeyPath 序列，保持首次出现的顺序
#[derive(Debug, Default)]
struct KeyAccumulator {
    seen: HashSet<KeyPath>,
    keys: Vec<KeyPath>,
}

impl KeyAccumulator {
    fn extend(&mut self, paths: Vec<KeyPath>) {
        for path in paths {
            if self.seen.insert(path.clone()) {
                self.keys.push(path);
            }
        }
    }
}

fn tree_for<'a>(resources: &'a ResourcesDictionary, locale: &str, namespace: &str) -> &'a Value {
    resources
        .get(locale)
        .and_then(|namespaces| namespaces.get(namespace))
        .unwrap_or(&EMPTY_TREE)
}

/// 找出远端存在、但任何 locale 的本地资源中都没有的 key，按 namespace 分组。
///
/// 同一 namespace 下所有 locale 的本地 key 合并为提及集合。数组不展开，
/// 因为远端不把数组元素当作独立 key。缺失的资源视为空树。
/// 每个 source 引用过的 namespace 都会出现在结果中（可能为空）。
/// locale 与 namespace 按配置顺序遍历，远端 key 保持首次出现的相对顺序。
pub fn unmentioned_keys(
    local: &ResourcesDictionary,
    remote: &ResourcesDictionary,
    sources: &SourcesIndex,
) -> NamespaceKeySet {
    let mut local_keys: IndexMap<&str, KeyAccumulator> = IndexMap::new();
    let mut remote_keys: IndexMap<&str, KeyAccumulator> = IndexMap::new();

    for (locale, namespaces) in sources {
        for namespace in namespaces.keys() {
            local_keys
                .entry(namespace.as_str())
                .or_default()
                .extend(flatten_keys(tree_for(local, locale, namespace), false));
            remote_keys
                .entry(namespace.as_str())
                .or_default()
                .extend(flatten_keys(tree_for(remote, locale, namespace), false));
        }
    }

    let mut unmentioned = NamespaceKeySet::new();
    for (namespace, mentioned) in &local_keys {
        let keys: Vec<KeyPath> = remote_keys
            .shift_remove(namespace)
            .map(|acc| acc.keys)
            .unwrap_or_default()
            .into_iter()
            .filter(|path| !mentioned.seen.contains(path))
            .collect();
        unmentioned.insert(namespace.to_string(), keys);
    }
    unmentioned
}

/// 所有 namespace 的 key 总数
pub fn key_count(keys: &NamespaceKeySet) -> usize {
    keys.values().map(Vec::len).sum()
}
