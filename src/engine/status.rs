// ==========================================
// 造船工单时间线引擎 - 采购状态分类
// ==========================================
// 红线: 状态是 "等级制",按规则表顺序判定,命中即返回
// ==========================================
// 规则表（优先级递减）:
// 1) STAGE_COMPLETED  阶段已完成            → completado
// 2) PO_RECEIVED      采购单已到货          → recibida
// 3) PO_PLACED        已有未取消的采购单    → pedida
// 4) NO_TIMING        无法判定期限          → pendiente
// 5) OVERDUE          剩余天数 < 0          → atrasado
// 6) URGENT_WINDOW    0 ≤ 剩余 ≤ 紧急窗口   → urgente
// 7) OUTSIDE_WINDOW   其他                  → pendiente
// genera_orden_compra = false 的阶段不参与分类（普通里程碑）
// ==========================================

use crate::config::EngineConfig;
use crate::domain::order::{PurchaseOrder, StageInstance};
use crate::domain::types::{ProcurementStatus, PurchaseOrderState, UrgencyBand};
use crate::domain::view::StageClassification;
use crate::engine::date_projector;
use chrono::{NaiveDate, NaiveDateTime};

/// 规则判定上下文
pub struct ClassifyInput<'a> {
    pub instance: &'a StageInstance,
    pub purchase_order: Option<&'a PurchaseOrder>,
    /// 距下单期限天数（None = 无时间信息）
    pub days_remaining: Option<i64>,
    pub config: &'a EngineConfig,
}

/// 单条分类规则
pub struct StatusRule {
    pub name: &'static str,
    pub apply: fn(&ClassifyInput<'_>) -> Option<StageClassification>,
}

/// 有序规则表
pub const STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        name: "STAGE_COMPLETED",
        apply: rule_stage_completed,
    },
    StatusRule {
        name: "PO_RECEIVED",
        apply: rule_po_received,
    },
    StatusRule {
        name: "PO_PLACED",
        apply: rule_po_placed,
    },
    StatusRule {
        name: "NO_TIMING",
        apply: rule_no_timing,
    },
    StatusRule {
        name: "OVERDUE",
        apply: rule_overdue,
    },
    StatusRule {
        name: "URGENT_WINDOW",
        apply: rule_urgent_window,
    },
    StatusRule {
        name: "OUTSIDE_WINDOW",
        apply: rule_outside_window,
    },
];

// ==========================================
// StatusClassifier - 采购状态分类器
// ==========================================
pub struct StatusClassifier {
    config: EngineConfig,
}

impl StatusClassifier {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// 分类单个阶段实例
    ///
    /// # 参数
    /// - instance: 阶段实例
    /// - deadline: 下单期限（None = 无法判定）
    /// - purchase_order: 匹配到的采购单
    /// - now: 参考时刻（调用方注入）
    ///
    /// # 返回
    /// - None: 非采购阶段,不分类
    pub fn classify(
        &self,
        instance: &StageInstance,
        deadline: Option<NaiveDate>,
        purchase_order: Option<&PurchaseOrder>,
        now: NaiveDateTime,
    ) -> Option<StageClassification> {
        if !instance.genera_orden_compra {
            return None;
        }

        let input = ClassifyInput {
            instance,
            purchase_order,
            days_remaining: date_projector::distance_from_today(deadline, now),
            config: &self.config,
        };

        Some(evaluate(&input))
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// 按规则表顺序判定
pub fn evaluate(input: &ClassifyInput<'_>) -> StageClassification {
    STATUS_RULES
        .iter()
        .find_map(|rule| (rule.apply)(input))
        .unwrap_or_else(|| plain(input, ProcurementStatus::Pendiente, "OUTSIDE_WINDOW"))
}

fn plain(
    input: &ClassifyInput<'_>,
    status: ProcurementStatus,
    rule: &'static str,
) -> StageClassification {
    StageClassification {
        status,
        urgent: false,
        overdue: false,
        days_remaining: input.days_remaining,
        band: None,
        rule,
    }
}

// ==========================================
// 规则实现
// ==========================================

fn rule_stage_completed(input: &ClassifyInput<'_>) -> Option<StageClassification> {
    input
        .instance
        .is_completed()
        .then(|| plain(input, ProcurementStatus::Completado, "STAGE_COMPLETED"))
}

fn rule_po_received(input: &ClassifyInput<'_>) -> Option<StageClassification> {
    let oc = input.purchase_order?;
    (oc.estado == PurchaseOrderState::Recibida)
        .then(|| plain(input, ProcurementStatus::Recibida, "PO_RECEIVED"))
}

fn rule_po_placed(input: &ClassifyInput<'_>) -> Option<StageClassification> {
    let oc = input.purchase_order?;
    (oc.estado != PurchaseOrderState::Cancelada)
        .then(|| plain(input, ProcurementStatus::Pedida, "PO_PLACED"))
}

fn rule_no_timing(input: &ClassifyInput<'_>) -> Option<StageClassification> {
    input
        .days_remaining
        .is_none()
        .then(|| plain(input, ProcurementStatus::Pendiente, "NO_TIMING"))
}

fn rule_overdue(input: &ClassifyInput<'_>) -> Option<StageClassification> {
    let diff = input.days_remaining?;
    (diff < 0).then(|| StageClassification {
        overdue: true,
        ..plain(input, ProcurementStatus::Atrasado, "OVERDUE")
    })
}

fn rule_urgent_window(input: &ClassifyInput<'_>) -> Option<StageClassification> {
    let diff = input.days_remaining?;
    if !(0..=input.config.urgent_window_days).contains(&diff) {
        return None;
    }
    let band = if diff <= input.config.critical_window_days {
        UrgencyBand::Critica
    } else {
        UrgencyBand::Proxima
    };
    Some(StageClassification {
        urgent: true,
        band: Some(band),
        ..plain(input, ProcurementStatus::Urgente, "URGENT_WINDOW")
    })
}

fn rule_outside_window(input: &ClassifyInput<'_>) -> Option<StageClassification> {
    Some(plain(input, ProcurementStatus::Pendiente, "OUTSIDE_WINDOW"))
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::StageState;

    // 基准时刻: 2024-06-10 09:00
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn procurement_stage() -> StageInstance {
        StageInstance {
            id: "E1".to_string(),
            obra_id: "O1".to_string(),
            nombre: "Motorización".to_string(),
            estado: StageState::Pendiente,
            genera_orden_compra: true,
            ..Default::default()
        }
    }

    fn purchase_order(estado: PurchaseOrderState) -> PurchaseOrder {
        PurchaseOrder {
            id: "OC1".to_string(),
            obra_id: "O1".to_string(),
            etapa_id: Some("E1".to_string()),
            estado,
            ..Default::default()
        }
    }

    fn classify(
        instance: &StageInstance,
        deadline: Option<NaiveDate>,
        oc: Option<&PurchaseOrder>,
    ) -> Option<StageClassification> {
        StatusClassifier::default().classify(instance, deadline, oc, now())
    }

    #[test]
    fn test_rule_table_order() {
        let names: Vec<&str> = STATUS_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "STAGE_COMPLETED",
                "PO_RECEIVED",
                "PO_PLACED",
                "NO_TIMING",
                "OVERDUE",
                "URGENT_WINDOW",
                "OUTSIDE_WINDOW"
            ]
        );
    }

    #[test]
    fn test_deadline_today_is_urgent() {
        let c = classify(&procurement_stage(), date(2024, 6, 10), None).unwrap();
        assert_eq!(c.status, ProcurementStatus::Urgente);
        assert!(c.urgent);
        assert!(!c.overdue);
        assert_eq!(c.days_remaining, Some(0));
        assert_eq!(c.band, Some(UrgencyBand::Critica));
    }

    #[test]
    fn test_past_deadline_is_overdue() {
        let c = classify(&procurement_stage(), date(2024, 5, 1), None).unwrap();
        assert_eq!(c.status, ProcurementStatus::Atrasado);
        assert!(c.overdue);
        assert!(!c.urgent);
        assert_eq!(c.days_remaining, Some(-40));
    }

    #[test]
    fn test_far_deadline_is_pending() {
        let c = classify(&procurement_stage(), date(2024, 6, 25), None).unwrap();
        assert_eq!(c.status, ProcurementStatus::Pendiente);
        assert!(!c.urgent);
        assert_eq!(c.days_remaining, Some(15));
        assert_eq!(c.rule, "OUTSIDE_WINDOW");
    }

    #[test]
    fn test_urgent_window_boundaries_and_bands() {
        let etapa = procurement_stage();
        let c = classify(&etapa, date(2024, 6, 17), None).unwrap();
        assert_eq!(c.status, ProcurementStatus::Urgente);
        assert_eq!(c.band, Some(UrgencyBand::Critica));

        let c = classify(&etapa, date(2024, 6, 18), None).unwrap();
        assert_eq!(c.status, ProcurementStatus::Urgente);
        assert_eq!(c.band, Some(UrgencyBand::Proxima));

        let c = classify(&etapa, date(2024, 6, 20), None).unwrap();
        assert_eq!(c.status, ProcurementStatus::Urgente);
        assert_eq!(c.days_remaining, Some(10));

        let c = classify(&etapa, date(2024, 6, 21), None).unwrap();
        assert_eq!(c.status, ProcurementStatus::Pendiente);
        assert_eq!(c.band, None);
    }

    #[test]
    fn test_missing_deadline_is_pending_without_timing() {
        let c = classify(&procurement_stage(), None, None).unwrap();
        assert_eq!(c.status, ProcurementStatus::Pendiente);
        assert_eq!(c.days_remaining, None);
        assert_eq!(c.rule, "NO_TIMING");
        assert!(!c.urgent && !c.overdue);
    }

    #[test]
    fn test_received_purchase_order_ignores_deadline() {
        let oc = purchase_order(PurchaseOrderState::Recibida);
        let c = classify(&procurement_stage(), date(2024, 5, 1), Some(&oc)).unwrap();
        assert_eq!(c.status, ProcurementStatus::Recibida);
        assert!(!c.overdue);
    }

    #[test]
    fn test_any_other_purchase_order_is_placed() {
        for estado in [PurchaseOrderState::Pedida, PurchaseOrderState::Otro] {
            let oc = purchase_order(estado);
            let c = classify(&procurement_stage(), date(2024, 6, 10), Some(&oc)).unwrap();
            assert_eq!(c.status, ProcurementStatus::Pedida);
            assert!(!c.urgent);
        }
    }

    #[test]
    fn test_cancelled_purchase_order_falls_through_to_timing() {
        let oc = purchase_order(PurchaseOrderState::Cancelada);
        let c = classify(&procurement_stage(), date(2024, 5, 1), Some(&oc)).unwrap();
        assert_eq!(c.status, ProcurementStatus::Atrasado);
        assert!(c.overdue);
    }

    #[test]
    fn test_completed_beats_purchase_order() {
        let mut etapa = procurement_stage();
        etapa.estado = StageState::Completado;
        let oc = purchase_order(PurchaseOrderState::Pedida);
        let c = classify(&etapa, date(2024, 5, 1), Some(&oc)).unwrap();
        assert_eq!(c.status, ProcurementStatus::Completado);
        let c = classify(&etapa, None, None).unwrap();
        assert_eq!(c.status, ProcurementStatus::Completado);
    }

    #[test]
    fn test_non_procurement_stage_not_classified() {
        let mut etapa = procurement_stage();
        etapa.genera_orden_compra = false;
        etapa.estado = StageState::Completado;
        assert!(classify(&etapa, date(2024, 5, 1), None).is_none());
    }

    #[test]
    fn test_custom_windows() {
        let config = EngineConfig {
            urgent_window_days: 7,
            critical_window_days: 3,
            ..Default::default()
        };
        let classifier = StatusClassifier::new(config);
        let etapa = procurement_stage();
        let c = classifier
            .classify(&etapa, date(2024, 6, 18), None, now())
            .unwrap();
        assert_eq!(c.status, ProcurementStatus::Pendiente);
        let c = classifier
            .classify(&etapa, date(2024, 6, 15), None, now())
            .unwrap();
        assert_eq!(c.band, Some(UrgencyBand::Proxima));
    }
}
