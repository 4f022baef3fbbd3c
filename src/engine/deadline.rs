// ==========================================
// 造船工单时间线引擎 - 采购期限计算
// ==========================================
// 职责: 阶段开始日期 + 提前期 → 下单期限
// 顺序（优先级递减）:
// 1) 采购单记录的 fecha_limite_pedido（事实优先于推算）
// 2) 阶段实例显式 fecha_inicio
// 3) 工单 fecha_inicio + dia_inicio 推算
// 提前期 > 0 → 期限 = 开始日 - 提前期; 否则期限 = 开始日
// 红线: 无法推算时返回 None（"无法判定",不是 "无需采购"）
// ==========================================

use crate::domain::order::{ProductionOrder, PurchaseOrder, StageInstance};
use crate::domain::types::DeadlineSource;
use crate::domain::view::{AccumulatedStage, Deadline};
use crate::engine::date_projector;
use chrono::NaiveDate;

// ==========================================
// DeadlineCalculator - 采购期限计算器
// ==========================================
pub struct DeadlineCalculator {
    // 无状态引擎,不需要注入依赖
}

impl DeadlineCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 阶段开始日期（显式覆盖优先,否则推算）
    ///
    /// stage 为 None 表示实例未关联到模板,只能使用显式日期
    pub fn stage_start(
        &self,
        stage: Option<&AccumulatedStage>,
        instance: Option<&StageInstance>,
        order: &ProductionOrder,
    ) -> Option<(NaiveDate, DeadlineSource)> {
        if let Some(start) = instance.and_then(|i| i.fecha_inicio) {
            return Some((start, DeadlineSource::StageOverride));
        }
        let stage = stage?;
        date_projector::project(order.fecha_inicio, stage.dia_inicio)
            .map(|start| (start, DeadlineSource::Projected))
    }

    /// 计算下单期限
    pub fn deadline(
        &self,
        stage: Option<&AccumulatedStage>,
        instance: &StageInstance,
        order: &ProductionOrder,
        purchase_order: Option<&PurchaseOrder>,
    ) -> Option<Deadline> {
        // 规则1: 采购单上记录的期限
        if let Some(limit) = purchase_order.and_then(|oc| oc.fecha_limite_pedido) {
            return Some(Deadline {
                date: limit,
                source: DeadlineSource::PurchaseOrderLimit,
            });
        }

        // 规则2/3: 开始日期
        let (start, source) = self.stage_start(stage, Some(instance), order)?;

        // 规则4: 提前期
        let date = match instance.lead_time_days() {
            Some(lead) => date_projector::shift_back(start, lead)?,
            None => start,
        };

        Some(Deadline { date, source })
    }
}

impl Default for DeadlineCalculator {
    fn default() -> Self {
        Self::new()
    }
}
