use serde_json::Value;

use crate::models::KeyPath;

/// 返回树中所有叶子节点的路径，按对象插入顺序 / 数组下标顺序输出。
///
/// 非空对象总是递归；非空数组仅在 `traverse_arrays` 时递归，否则整体作为叶子。
/// 空对象和空数组既不是叶子也不递归，直接从结果中消失。
pub fn flatten_keys(tree: &Value, traverse_arrays: bool) -> Vec<KeyPath> {
    flatten_keys_with_prefix(tree, traverse_arrays, &[])
}

pub fn flatten_keys_with_prefix(
    tree: &Value,
    traverse_arrays: bool,
    prefix: &[String],
) -> Vec<KeyPath> {
    let mut paths = Vec::new();
    let mut current = prefix.to_vec();
    match tree {
        Value::Object(map) => {
            for (key, value) in map {
                visit(key.clone(), value, traverse_arrays, &mut current, &mut paths);
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                visit(index.to_string(), value, traverse_arrays, &mut current, &mut paths);
            }
        }
        // 标量根节点没有 key
        _ => {}
    }
    paths
}

fn visit(
    segment: String,
    value: &Value,
    traverse_arrays: bool,
    current: &mut KeyPath,
    paths: &mut Vec<KeyPath>,
) {
    current.push(segment);
    match value {
        Value::Object(map) if map.is_empty() => {}
        Value::Array(items) if items.is_empty() => {}
        Value::Object(map) => {
            for (key, child) in map {
                visit(key.clone(), child, traverse_arrays, current, paths);
            }
        }
        Value::Array(items) if traverse_arrays => {
            for (index, child) in items.iter().enumerate() {
                visit(index.to_string(), child, traverse_arrays, current, paths);
            }
        }
        _ => paths.push(current.clone()),
    }
    current.pop();
}
