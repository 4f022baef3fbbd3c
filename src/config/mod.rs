// ==========================================
// 造船工单时间线引擎 - 配置层
// ==========================================
// 职责: 引擎阈值配置,支持 JSON / key-value 两种来源
// ==========================================

pub mod engine_config;

// 重导出核心配置
pub use engine_config::{config_keys, EngineConfig};
