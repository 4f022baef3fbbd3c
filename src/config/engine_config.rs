// ==========================================
// 造船工单时间线引擎 - 引擎配置
// ==========================================
// 职责: 紧急窗口 / 展示子档 / 描述拆分参数
// 来源: JSON 文件 / JSON 文本 / key-value 对（与 config_kv 同构）
// ==========================================

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// 配置键常量
pub mod config_keys {
    pub const URGENT_WINDOW_DAYS: &str = "urgent_window_days";
    pub const CRITICAL_WINDOW_DAYS: &str = "critical_window_days";
    pub const TITLE_MAX_COLUMN: &str = "title_max_column";
}

pub const DEFAULT_URGENT_WINDOW_DAYS: i64 = 10;
pub const DEFAULT_CRITICAL_WINDOW_DAYS: i64 = 7;
pub const DEFAULT_TITLE_MAX_COLUMN: usize = 32;

// ==========================================
// EngineConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 紧急窗口（天）: 0 ≤ 剩余天数 ≤ 该值 → urgente
    pub urgent_window_days: i64,

    /// 展示强调子档（天）: 剩余天数 ≤ 该值 → band = critica
    pub critical_window_days: i64,

    /// 描述标题冒号所在列上限（不含）
    pub title_max_column: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            urgent_window_days: DEFAULT_URGENT_WINDOW_DAYS,
            critical_window_days: DEFAULT_CRITICAL_WINDOW_DAYS,
            title_max_column: DEFAULT_TITLE_MAX_COLUMN,
        }
    }
}

impl EngineConfig {
    /// 从 JSON 文本加载（缺失字段取默认值）
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json).map_err(EngineError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// 从 key-value 对加载
    ///
    /// 未知键忽略；值格式错误 → 记录 warn 并使用默认值
    pub fn from_kv(pairs: &HashMap<String, String>) -> EngineResult<Self> {
        let mut config = EngineConfig::default();

        if let Some(v) = pairs.get(config_keys::URGENT_WINDOW_DAYS) {
            config.urgent_window_days =
                parse_or_default(config_keys::URGENT_WINDOW_DAYS, v, DEFAULT_URGENT_WINDOW_DAYS);
        }
        if let Some(v) = pairs.get(config_keys::CRITICAL_WINDOW_DAYS) {
            config.critical_window_days = parse_or_default(
                config_keys::CRITICAL_WINDOW_DAYS,
                v,
                DEFAULT_CRITICAL_WINDOW_DAYS,
            );
        }
        if let Some(v) = pairs.get(config_keys::TITLE_MAX_COLUMN) {
            config.title_max_column =
                parse_or_default(config_keys::TITLE_MAX_COLUMN, v, DEFAULT_TITLE_MAX_COLUMN);
        }

        config.validate()?;
        Ok(config)
    }

    /// 校验配置一致性
    pub fn validate(&self) -> EngineResult<()> {
        if self.urgent_window_days < 0 {
            return Err(EngineError::ConfigInvalid {
                key: config_keys::URGENT_WINDOW_DAYS.to_string(),
                message: format!("不能为负数: {}", self.urgent_window_days),
            });
        }
        if self.critical_window_days < 0 {
            return Err(EngineError::ConfigInvalid {
                key: config_keys::CRITICAL_WINDOW_DAYS.to_string(),
                message: format!("不能为负数: {}", self.critical_window_days),
            });
        }
        if self.critical_window_days > self.urgent_window_days {
            return Err(EngineError::ConfigInvalid {
                key: config_keys::CRITICAL_WINDOW_DAYS.to_string(),
                message: format!(
                    "不能大于 {}: {} > {}",
                    config_keys::URGENT_WINDOW_DAYS,
                    self.critical_window_days,
                    self.urgent_window_days
                ),
            });
        }
        if self.title_max_column == 0 {
            return Err(EngineError::ConfigInvalid {
                key: config_keys::TITLE_MAX_COLUMN.to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_or_default<T>(key: &str, raw: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!("配置值格式错误: key={}, value={}, 使用默认值 {}", key, raw, default);
            default
        }
    }
}
