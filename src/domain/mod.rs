// ==========================================
// 造船工单时间线引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、状态类型、派生视图对象
// 红线: 不含引擎逻辑,实体均为调用方提供的只读快照
// ==========================================

pub mod lenient;
pub mod line;
pub mod order;
pub mod snapshot;
pub mod types;
pub mod view;

// 重导出核心类型
pub use line::{ProductionLine, StageTemplate};
pub use order::{ProductionOrder, PurchaseOrder, StageInstance};
pub use snapshot::Snapshot;
pub use types::{
    DeadlineSource, OrderState, ProcurementKind, ProcurementStatus, PurchaseOrderState,
    StageState, UrgencyBand,
};
pub use view::{AccumulatedStage, Deadline, ParsedItem, StageClassification, StageView};
