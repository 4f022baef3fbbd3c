// ==========================================
// 造船工单时间线引擎 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 引擎计算本身不报错（降级为 None / 无时间信息）,
//       仅配置与快照边界会返回错误
// ==========================================

use thiserror::Error;

/// 引擎边界错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 配置错误 =====
    #[error("配置文件读取失败 ({path}): {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("配置值非法 (key: {key}): {message}")]
    ConfigInvalid { key: String, message: String },

    // ===== 快照错误 =====
    #[error("快照解析失败: {0}")]
    SnapshotParse(#[source] serde_json::Error),

    #[error("快照集合格式错误: {field} 必须为数组")]
    InvalidCollection { field: String },
}

/// 引擎结果类型别名
pub type EngineResult<T> = Result<T, EngineError>;
