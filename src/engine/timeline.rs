// ==========================================
// 造船工单时间线引擎 - 工单时间线编排
// ==========================================
// 职责: 串联 模板累计 → 日期推算 → 期限计算 → 状态分类
// 输入: 工单 + 产线累计模板 + 阶段实例 + 采购单 + 参考时刻
// 输出: OrderTimeline（按 dia_inicio 升序的 StageView 列表）
// 红线: 纯计算,不缓存,不改写输入; "现在" 由调用方注入
// ==========================================

use crate::config::EngineConfig;
use crate::domain::line::StageTemplate;
use crate::domain::order::{ProductionOrder, PurchaseOrder, StageInstance};
use crate::domain::types::PurchaseOrderState;
use crate::domain::view::{AccumulatedStage, StageView};
use crate::engine::accumulator::{self, TemplateAccumulator};
use crate::engine::board::ProcurementSummary;
use crate::engine::date_projector;
use crate::engine::deadline::DeadlineCalculator;
use crate::engine::lookup::{MatchKey, TwoKeyIndex};
use crate::engine::status::StatusClassifier;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, instrument};

/// 单条产线的累计模板
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTimeline {
    pub linea_id: String,
    pub stages: Vec<AccumulatedStage>,
    /// 全部阶段工期之和（天）
    pub total_days: i64,
}

/// 单个工单的时间线视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderTimeline {
    pub obra_id: String,
    pub codigo: String,
    pub linea_id: String,
    /// 按模板顺序的阶段视图
    pub stages: Vec<StageView>,
    /// 未能关联到模板的阶段实例
    pub unplaced: Vec<StageView>,
    /// 工单当前第几天（未开工 → None）
    pub current_day: Option<i64>,
    /// 当前所处阶段的模板 ID
    pub current_stage_id: Option<String>,
    /// 完成度（已完成阶段 / 模板阶段数）
    pub progress: f64,
}

impl OrderTimeline {
    /// 采购相关阶段（已分类）
    pub fn procurement(&self) -> Vec<&StageView> {
        self.stages
            .iter()
            .chain(self.unplaced.iter())
            .filter(|v| v.is_procurement())
            .collect()
    }

    pub fn summary(&self) -> ProcurementSummary {
        ProcurementSummary::from_views(self.procurement())
    }

    /// 推算完工日期（开工日 + 模板总工期）
    pub fn projected_end(&self, order: &ProductionOrder, line: &LineTimeline) -> Option<NaiveDate> {
        date_projector::project(order.fecha_inicio, line.total_days)
    }
}

// ==========================================
// TimelineEngine - 时间线编排引擎
// ==========================================
pub struct TimelineEngine {
    accumulator: TemplateAccumulator,
    deadlines: DeadlineCalculator,
    classifier: StatusClassifier,
}

impl TimelineEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            accumulator: TemplateAccumulator::new(),
            deadlines: DeadlineCalculator::new(),
            classifier: StatusClassifier::new(config),
        }
    }

    /// 累计单条产线模板（每条产线调用一次）
    pub fn build_line(&self, linea_id: &str, templates: &[StageTemplate]) -> LineTimeline {
        let stages = self.accumulator.accumulate(templates);
        let total_days = accumulator::total_days(&stages);
        LineTimeline {
            linea_id: linea_id.to_string(),
            stages,
            total_days,
        }
    }

    /// 构建工单时间线
    ///
    /// # 参数
    /// - order: 工单
    /// - line: 该工单所属产线的累计模板
    /// - instances / purchase_orders: 可包含其他工单的记录,内部按 obra_id 过滤
    /// - now: 参考时刻
    #[instrument(skip_all, fields(obra_id = %order.id, stages = line.stages.len()))]
    pub fn build_order(
        &self,
        order: &ProductionOrder,
        line: &LineTimeline,
        instances: &[StageInstance],
        purchase_orders: &[PurchaseOrder],
        now: NaiveDateTime,
    ) -> OrderTimeline {
        let own_instances: Vec<StageInstance> = instances
            .iter()
            .filter(|e| e.obra_id == order.id)
            .cloned()
            .collect();
        // 已取消的采购单不参与匹配
        let own_orders: Vec<PurchaseOrder> = purchase_orders
            .iter()
            .filter(|oc| oc.obra_id == order.id && oc.estado != PurchaseOrderState::Cancelada)
            .cloned()
            .collect();

        let po_index = TwoKeyIndex::build(
            &own_orders,
            |oc| oc.etapa_id.as_deref(),
            |oc| oc.etapa_nombre.as_deref(),
        );
        let match_po = |instance: &StageInstance| {
            po_index.find(Some(instance.id.as_str()), Some(instance.nombre.as_str()))
        };

        let claims = resolve_instances(line, &own_instances);
        let mut placed = vec![false; own_instances.len()];
        let mut completed = 0usize;

        let stages: Vec<StageView> = line
            .stages
            .iter()
            .zip(claims.iter().copied())
            .map(|(stage, claim)| {
                let instance = claim.map(|(pos, _)| {
                    placed[pos] = true;
                    &own_instances[pos]
                });
                if instance.is_some_and(StageInstance::is_completed) {
                    completed += 1;
                }
                let purchase_order = instance.and_then(match_po);
                self.stage_view(Some(stage), instance, purchase_order, order, now)
            })
            .collect();

        let unplaced: Vec<StageView> = own_instances
            .iter()
            .zip(&placed)
            .filter(|(_, placed)| !**placed)
            .map(|(e, _)| {
                debug!(
                    "阶段实例未关联模板: obra_id={}, etapa_id={}, nombre={}",
                    order.id, e.id, e.nombre
                );
                self.stage_view(None, Some(e), match_po(e), order, now)
            })
            .collect();

        let current_day = date_projector::days_since(order.fecha_inicio, now);
        let current_stage_id = current_day.and_then(|day| {
            line.stages
                .iter()
                .find(|s| s.contains_day(day))
                .map(|s| s.template.id.clone())
        });
        let progress = if line.stages.is_empty() {
            0.0
        } else {
            completed as f64 / line.stages.len() as f64
        };

        OrderTimeline {
            obra_id: order.id.clone(),
            codigo: order.codigo.clone(),
            linea_id: order.linea_id.clone(),
            stages,
            unplaced,
            current_day,
            current_stage_id,
            progress,
        }
    }

    /// 组装单阶段视图
    fn stage_view(
        &self,
        stage: Option<&AccumulatedStage>,
        instance: Option<&StageInstance>,
        purchase_order: Option<&PurchaseOrder>,
        order: &ProductionOrder,
        now: NaiveDateTime,
    ) -> StageView {
        let start_date = self
            .deadlines
            .stage_start(stage, instance, order)
            .map(|(date, _)| date);
        let end_date = match (start_date, stage) {
            (Some(start), Some(s)) => date_projector::project(Some(start), s.dias),
            (Some(start), None) => Some(start),
            _ => None,
        };

        let procurement = instance.filter(|i| i.genera_orden_compra);
        let deadline = procurement
            .and_then(|i| self.deadlines.deadline(stage, i, order, purchase_order));
        let classification = procurement.and_then(|i| {
            self.classifier
                .classify(i, deadline.map(|d| d.date), purchase_order, now)
        });

        StageView {
            stage: stage.cloned(),
            instance: instance.cloned(),
            purchase_order: purchase_order.cloned(),
            start_date,
            end_date,
            deadline,
            classification,
        }
    }
}

/// 实例 → 模板 解析（每个实例至多占用一个模板位置）
///
/// - 实例先按 linea_proceso_id 命中模板 ID,未命中才按名称回退
/// - 同一模板被多个实例命中时: ID 命中优先于名称命中,同级取首条
///
/// 返回与 line.stages 对齐的 (实例下标, 命中方式)
fn resolve_instances(
    line: &LineTimeline,
    instances: &[StageInstance],
) -> Vec<Option<(usize, MatchKey)>> {
    let positions: Vec<usize> = (0..line.stages.len()).collect();
    let template_index = TwoKeyIndex::build(
        &positions,
        |pos| Some(line.stages[*pos].template.id.as_str()),
        |pos| Some(line.stages[*pos].template.nombre.as_str()),
    );

    let mut claims: Vec<Option<(usize, MatchKey)>> = vec![None; line.stages.len()];
    for (idx, instance) in instances.iter().enumerate() {
        let hit = template_index.find_with_key(
            instance.linea_proceso_id.as_deref(),
            Some(instance.nombre.as_str()),
        );
        if let Some((&pos, key)) = hit {
            match claims[pos] {
                None => claims[pos] = Some((idx, key)),
                Some((_, MatchKey::Name)) if key == MatchKey::Id => claims[pos] = Some((idx, key)),
                Some(_) => {}
            }
        }
    }
    claims
}

impl Default for TimelineEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
