// ==========================================
// 造船工单时间线引擎 - 核心库
// ==========================================
// 系统定位: 看板背后的纯计算引擎（不含存储、不含界面）
// 输入: 产线模板 / 工单 / 阶段实例 / 采购单 快照
// 输出: 阶段时间线视图、采购期限与状态、描述条目
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 引擎阈值
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    DeadlineSource, OrderState, ProcurementKind, ProcurementStatus, PurchaseOrderState,
    StageState, UrgencyBand,
};

// 领域实体
pub use domain::{
    AccumulatedStage, Deadline, ParsedItem, ProductionLine, ProductionOrder, PurchaseOrder,
    Snapshot, StageClassification, StageInstance, StageTemplate, StageView,
};

// 引擎
pub use engine::{
    DescriptionParser, ProcurementBoard, StatusClassifier, TemplateAccumulator, TimelineEngine,
};

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "造船工单时间线引擎";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
