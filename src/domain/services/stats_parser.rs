// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

use crate::domain::models::core_stats::{CoreStatRecord, CoreStats, MBeanCategory, MBeanStats};
use crate::utils::errors::ParseError;

/// 解析 `admin/cores?action=STATUS` 的响应
///
/// 顶层结构无法解析时返回 `ParseError::HardTopLevel`；
/// 单个 core 的统计段无法解析时只把该 core 标记为失败。
///
/// # 返回值
///
/// 按 core 名称升序排列的统计记录
pub fn parse_core_status(payload: &[u8]) -> Result<Vec<CoreStatRecord>, ParseError> {
    let root: Value = serde_json::from_slice(payload)
        .map_err(|e| ParseError::HardTopLevel(format!("invalid JSON: {}", e)))?;
    let root = root
        .as_object()
        .ok_or_else(|| ParseError::HardTopLevel("payload is not a JSON object".to_string()))?;

    check_response_header(root)?;
    log_init_failures(root);

    let status = root
        .get("status")
        .and_then(Value::as_object)
        .ok_or_else(|| ParseError::HardTopLevel("missing 'status' object".to_string()))?;

    let records = status
        .iter()
        .map(|(core, section)| match parse_core_section(core, section) {
            Ok(stats) => CoreStatRecord::Parsed {
                core: core.clone(),
                stats,
            },
            Err(err) => {
                warn!(core = %core, error = %err, "Skipping core with malformed statistics");
                CoreStatRecord::Failed {
                    core: core.clone(),
                    reason: failure_reason(err),
                }
            }
        })
        .collect();

    Ok(records)
}

/// 解析 `{core}/admin/mbeans?stats=true` 的响应
///
/// 所有错误都是该 core 的软错误。`solr-mbeans` 既可以是 map
/// (`json.nl=map`)，也可以是 `["CATEGORY", {...}, ...]` 交替数组。
pub fn parse_mbeans(core: &str, payload: &[u8]) -> Result<Vec<MBeanStats>, ParseError> {
    let root: Value =
        serde_json::from_slice(payload).map_err(|e| soft(core, format!("invalid JSON: {}", e)))?;
    let mbeans = root
        .get("solr-mbeans")
        .ok_or_else(|| soft(core, "missing 'solr-mbeans'"))?;

    let categories: Vec<(&str, &Value)> = match mbeans {
        Value::Object(map) => map.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        Value::Array(items) => {
            if items.len() % 2 != 0 {
                return Err(soft(core, "odd number of entries in 'solr-mbeans'"));
            }
            items
                .chunks(2)
                .map(|pair| match &pair[0] {
                    Value::String(name) => Ok((name.as_str(), &pair[1])),
                    _ => Err(soft(core, "category name is not a string")),
                })
                .collect::<Result<_, _>>()?
        }
        _ => return Err(soft(core, "'solr-mbeans' is neither an object nor an array")),
    };

    let mut result = Vec::new();
    for (category_name, entries) in categories {
        let Some(category) = MBeanCategory::from_solr(category_name) else {
            continue;
        };
        let entries = entries.as_object().ok_or_else(|| {
            soft(
                core,
                format!("category '{}' is not an object", category_name),
            )
        })?;

        for (name, bean) in entries {
            let Some(stats) = bean.get("stats").and_then(Value::as_object) else {
                continue;
            };
            let values: BTreeMap<String, f64> = stats
                .iter()
                .filter_map(|(key, value)| {
                    scalar(value).map(|v| (normalize_key(key, name).to_string(), v))
                })
                .collect();
            if !values.is_empty() {
                result.push(MBeanStats {
                    category,
                    name: name.clone(),
                    values,
                });
            }
        }
    }

    Ok(result)
}

fn parse_core_section(core: &str, section: &Value) -> Result<CoreStats, ParseError> {
    let section = section
        .as_object()
        .ok_or_else(|| soft(core, "core section is not an object"))?;
    let index = section
        .get("index")
        .and_then(Value::as_object)
        .ok_or_else(|| soft(core, "missing 'index' object"))?;
    if index.get("numDocs").and_then(scalar).is_none() {
        return Err(soft(core, "missing numeric 'index.numDocs'"));
    }

    let mut values = BTreeMap::new();
    for (key, value) in section.iter().filter(|(key, _)| key.as_str() != "index") {
        if let Some(v) = scalar(value) {
            values.insert(key.clone(), v);
        }
    }
    for (key, value) in index {
        if let Some(v) = scalar(value) {
            values.insert(key.clone(), v);
        }
    }

    Ok(CoreStats {
        values,
        mbeans: Vec::new(),
    })
}

fn check_response_header(root: &Map<String, Value>) -> Result<(), ParseError> {
    let status = root
        .get("responseHeader")
        .and_then(|header| header.get("status"))
        .and_then(Value::as_i64);
    match status {
        Some(code) if code != 0 => Err(ParseError::HardTopLevel(format!(
            "Solr reported status {}",
            code
        ))),
        _ => Ok(()),
    }
}

fn log_init_failures(root: &Map<String, Value>) {
    if let Some(failures) = root.get("initFailures").and_then(Value::as_object) {
        for (core, reason) in failures {
            warn!(core = %core, reason = %reason, "Solr failed to initialise core");
        }
    }
}

/// 数值直接返回，布尔值转换为 1/0，其他类型忽略
fn scalar(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// 去掉 Solr 7+ 的 `分类.mbean名.` 前缀和计量器的 `.count` 后缀
///
/// `UPDATE.updateHandler.commits.count` 变为 `commits`，
/// `QUERY./select.requests` 变为 `requests`，旧版的 key 保持不变。
fn normalize_key<'a>(key: &'a str, bean: &str) -> &'a str {
    let key = match key.find(&format!(".{}.", bean)) {
        Some(pos) => &key[pos + bean.len() + 2..],
        None => key,
    };
    key.strip_suffix(".count").unwrap_or(key)
}

fn soft(core: &str, reason: impl Into<String>) -> ParseError {
    ParseError::SoftPerCore {
        core: core.to_string(),
        reason: reason.into(),
    }
}

fn failure_reason(err: ParseError) -> String {
    match err {
        ParseError::SoftPerCore { reason, .. } => reason,
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "stats_parser_test.rs"]
mod tests;
