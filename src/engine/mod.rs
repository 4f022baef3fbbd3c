// ==========================================
// 造船工单时间线引擎 - 引擎层
// ==========================================
// 职责: 时间线推算、采购期限、状态分类、描述拆分
// 红线: 纯同步计算,不做 I/O,不读系统时钟（system_now 仅供最外层）
// ==========================================

pub mod accumulator;
pub mod board;
pub mod date_projector;
pub mod deadline;
pub mod description;
pub mod lookup;
pub mod status;
pub mod timeline;

// 重导出核心引擎
pub use accumulator::TemplateAccumulator;
pub use board::{BoardEntry, BoardReport, ProcurementBoard, ProcurementSummary};
pub use deadline::DeadlineCalculator;
pub use description::{parse_description, DescriptionParser};
pub use lookup::{MatchKey, TwoKeyIndex};
pub use status::{StatusClassifier, StatusRule, STATUS_RULES};
pub use timeline::{LineTimeline, OrderTimeline, TimelineEngine};
