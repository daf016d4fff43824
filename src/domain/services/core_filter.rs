// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use regex::Regex;

use crate::domain::models::core_stats::CoreStatRecord;
use crate::utils::errors::ConfigError;

/// core 排除过滤器
///
/// 正则只在启动时编译一次，采集路径上不再校验
#[derive(Debug, Clone, Default)]
pub struct CoreFilter {
    pattern: Option<Regex>,
}

impl CoreFilter {
    /// 编译排除正则，空字符串表示不排除任何 core
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Ok(Self::default());
        }

        let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: Some(regex),
        })
    }

    /// 是否未配置排除规则
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// 按原始 core 名称匹配，不做大小写或空白归一化
    pub fn is_excluded(&self, core: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|regex| regex.is_match(core))
    }

    /// 移除被排除 core 的记录，保持原有顺序
    pub fn filter(&self, mut records: Vec<CoreStatRecord>) -> Vec<CoreStatRecord> {
        records.retain(|record| !self.is_excluded(record.core()));
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::core_stats::CoreStats;

    fn retained<'a>(filter: &CoreFilter, names: &[&'a str]) -> Vec<&'a str> {
        names
            .iter()
            .copied()
            .filter(|name| !filter.is_excluded(name))
            .collect()
    }

    #[test]
    fn test_empty_pattern_retains_everything() {
        let filter = CoreFilter::new("").unwrap();
        assert!(filter.is_empty());
        let names = ["core1", "test_a", "", " spaced "];
        assert_eq!(retained(&filter, &names), names.to_vec());
    }

    #[test]
    fn test_anchored_prefix_pattern() {
        let filter = CoreFilter::new("^test_").unwrap();
        assert!(!filter.is_empty());
        assert_eq!(retained(&filter, &["test_a", "prod_b"]), vec!["prod_b"]);
    }

    #[test]
    fn test_unanchored_pattern_matches_anywhere() {
        let filter = CoreFilter::new("tmp").unwrap();
        assert_eq!(
            retained(&filter, &["core_tmp_1", "tmp", "live"]),
            vec!["live"]
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filter = CoreFilter::new("^test_").unwrap();
        assert_eq!(retained(&filter, &["TEST_a", "test_b"]), vec!["TEST_a"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = CoreFilter::new("(unclosed").unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_filter_drops_failed_and_parsed_alike() {
        let filter = CoreFilter::new("^test_").unwrap();
        let records = vec![
            CoreStatRecord::Parsed {
                core: "test_a".to_string(),
                stats: CoreStats::default(),
            },
            CoreStatRecord::Failed {
                core: "test_b".to_string(),
                reason: "broken".to_string(),
            },
            CoreStatRecord::Parsed {
                core: "prod".to_string(),
                stats: CoreStats::default(),
            },
        ];

        let kept = filter.filter(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].core(), "prod");
    }
}
