// ==========================================
// 造船工单时间线引擎 - 采购看板
// ==========================================
// 职责: 跨工单汇总采购相关阶段,按行动优先级排序
// 范围: 仅 estado = activa 的工单
// 排序: 状态权重 → 剩余天数升序（无时间信息排后）→ 工单编码
// ==========================================

use crate::config::EngineConfig;
use crate::domain::snapshot::Snapshot;
use crate::domain::types::ProcurementStatus;
use crate::domain::view::StageView;
use crate::engine::timeline::{LineTimeline, OrderTimeline, TimelineEngine};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// 采购状态汇总（看板 KPI）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcurementSummary {
    pub total: usize,
    pub completado: usize,
    pub recibida: usize,
    pub pedida: usize,
    pub atrasado: usize,
    pub urgente: usize,
    pub pendiente: usize,
    /// 尚需行动阶段的预估金额合计
    pub monto_pendiente: f64,
}

impl ProcurementSummary {
    pub fn from_views<'a, I>(views: I) -> Self
    where
        I: IntoIterator<Item = &'a StageView>,
    {
        let mut summary = ProcurementSummary::default();
        for view in views {
            let status = match view.status() {
                Some(s) => s,
                None => continue,
            };
            summary.total += 1;
            match status {
                ProcurementStatus::Completado => summary.completado += 1,
                ProcurementStatus::Recibida => summary.recibida += 1,
                ProcurementStatus::Pedida => summary.pedida += 1,
                ProcurementStatus::Atrasado => summary.atrasado += 1,
                ProcurementStatus::Urgente => summary.urgente += 1,
                ProcurementStatus::Pendiente => summary.pendiente += 1,
            }
            if status.needs_action() {
                summary.monto_pendiente += view
                    .instance
                    .as_ref()
                    .map(|i| i.orden_compra_monto_estimado)
                    .unwrap_or(0.0);
            }
        }
        summary
    }

    /// 需要立即关注的数量（超期 + 紧急）
    pub fn alerts(&self) -> usize {
        self.atrasado + self.urgente
    }
}

/// 看板条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardEntry {
    pub obra_id: String,
    pub obra_codigo: String,
    pub linea_id: String,
    pub linea_nombre: String,
    pub view: StageView,
}

/// 看板结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardReport {
    pub entries: Vec<BoardEntry>,
    pub summary: ProcurementSummary,
}

// ==========================================
// ProcurementBoard - 采购看板
// ==========================================
pub struct ProcurementBoard {
    engine: TimelineEngine,
}

impl ProcurementBoard {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: TimelineEngine::new(config),
        }
    }

    /// 全部工单时间线（含非 activa 工单）
    ///
    /// 每条产线只累计一次模板
    #[instrument(skip_all, fields(obras = snapshot.obras.len()))]
    pub fn timelines(&self, snapshot: &Snapshot, now: NaiveDateTime) -> Vec<OrderTimeline> {
        let mut lines: HashMap<&str, LineTimeline> = HashMap::new();

        snapshot
            .obras
            .iter()
            .map(|order| {
                let line = lines.entry(order.linea_id.as_str()).or_insert_with(|| {
                    self.engine
                        .build_line(&order.linea_id, &snapshot.templates_for_line(&order.linea_id))
                });
                self.engine.build_order(
                    order,
                    line,
                    &snapshot.instances_for_order(&order.id),
                    &snapshot.purchase_orders_for_order(&order.id),
                    now,
                )
            })
            .collect()
    }

    /// 构建采购看板
    #[instrument(skip_all, fields(obras = snapshot.obras.len()))]
    pub fn build(&self, snapshot: &Snapshot, now: NaiveDateTime) -> BoardReport {
        let timelines = self.timelines(snapshot, now);

        let mut entries: Vec<BoardEntry> = Vec::new();
        for (order, timeline) in snapshot.obras.iter().zip(timelines) {
            if !order.estado.is_active() {
                debug!("跳过非进行中工单: obra_id={}, estado={}", order.id, order.estado);
                continue;
            }
            let linea_nombre = snapshot
                .line(&order.linea_id)
                .map(|l| l.nombre.clone())
                .unwrap_or_default();

            for view in timeline.stages.into_iter().chain(timeline.unplaced) {
                if !view.is_procurement() {
                    continue;
                }
                entries.push(BoardEntry {
                    obra_id: order.id.clone(),
                    obra_codigo: order.codigo.clone(),
                    linea_id: order.linea_id.clone(),
                    linea_nombre: linea_nombre.clone(),
                    view,
                });
            }
        }

        entries.sort_by(compare_entries);
        let summary = ProcurementSummary::from_views(entries.iter().map(|e| &e.view));

        info!(
            "采购看板生成完成: entries={}, atrasado={}, urgente={}",
            entries.len(),
            summary.atrasado,
            summary.urgente
        );

        BoardReport { entries, summary }
    }
}

impl Default for ProcurementBoard {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn compare_entries(a: &BoardEntry, b: &BoardEntry) -> Ordering {
    let rank = |e: &BoardEntry| e.view.status().map(|s| s.board_rank()).unwrap_or(u8::MAX);
    let days = |e: &BoardEntry| e.view.classification.as_ref().and_then(|c| c.days_remaining);

    rank(a)
        .cmp(&rank(b))
        .then_with(|| match (days(a), days(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.obra_codigo.cmp(&b.obra_codigo))
}
