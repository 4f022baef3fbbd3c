// ==========================================
// 造船工单时间线引擎 - 领域类型定义
// ==========================================
// 职责: 工单/阶段/采购单的生命周期状态 + 采购状态分类结果
// 序列化格式: 小写西语标识 (与上游数据一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单状态 (Order State)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    #[default]
    Activa, // 进行中
    Pausada,   // 暂停
    Terminada, // 完工
    Cancelada, // 取消
}

impl OrderState {
    /// 是否参与采购看板汇总
    pub fn is_active(&self) -> bool {
        matches!(self, OrderState::Activa)
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderState::Activa => write!(f, "activa"),
            OrderState::Pausada => write!(f, "pausada"),
            OrderState::Terminada => write!(f, "terminada"),
            OrderState::Cancelada => write!(f, "cancelada"),
        }
    }
}

// ==========================================
// 阶段实例状态 (Stage State)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    #[default]
    Pendiente, // 未开始
    EnCurso,    // 进行中
    Completado, // 已完成
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageState::Pendiente => write!(f, "pendiente"),
            StageState::EnCurso => write!(f, "en_curso"),
            StageState::Completado => write!(f, "completado"),
        }
    }
}

// ==========================================
// 采购单状态 (Purchase Order State)
// ==========================================
// 未知取值统一落到 Otro,按 "已有采购单" 处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderState {
    #[default]
    Pedida, // 已下单
    Recibida,  // 已到货
    Cancelada, // 已取消
    #[serde(other)]
    Otro,
}

impl fmt::Display for PurchaseOrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseOrderState::Pedida => write!(f, "pedida"),
            PurchaseOrderState::Recibida => write!(f, "recibida"),
            PurchaseOrderState::Cancelada => write!(f, "cancelada"),
            PurchaseOrderState::Otro => write!(f, "otro"),
        }
    }
}

// ==========================================
// 采购类型 (Procurement Kind)
// ==========================================
// aviso: 仅需与供应商确认,不走完整采购单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementKind {
    Aviso,
    #[default]
    #[serde(other)]
    Compra,
}

// ==========================================
// 采购状态 (Procurement Status)
// ==========================================
// 分类器输出,按优先级声明
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementStatus {
    Completado, // 阶段已完成
    Recibida,   // 采购单已到货
    Pedida,     // 已有采购单
    Atrasado,   // 超过下单期限
    Urgente,    // 临近下单期限
    Pendiente,  // 尚无需行动 / 无时间信息
}

impl ProcurementStatus {
    /// 看板排序权重（越小越靠前）
    pub fn board_rank(&self) -> u8 {
        match self {
            ProcurementStatus::Atrasado => 0,
            ProcurementStatus::Urgente => 1,
            ProcurementStatus::Pendiente => 2,
            ProcurementStatus::Pedida => 3,
            ProcurementStatus::Recibida => 4,
            ProcurementStatus::Completado => 5,
        }
    }

    /// 是否仍需采购动作
    pub fn needs_action(&self) -> bool {
        matches!(
            self,
            ProcurementStatus::Atrasado | ProcurementStatus::Urgente | ProcurementStatus::Pendiente
        )
    }
}

impl fmt::Display for ProcurementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcurementStatus::Completado => write!(f, "completado"),
            ProcurementStatus::Recibida => write!(f, "recibida"),
            ProcurementStatus::Pedida => write!(f, "pedida"),
            ProcurementStatus::Atrasado => write!(f, "atrasado"),
            ProcurementStatus::Urgente => write!(f, "urgente"),
            ProcurementStatus::Pendiente => write!(f, "pendiente"),
        }
    }
}

// ==========================================
// 紧急子档 (Urgency Band)
// ==========================================
// 仅用于展示强调,不构成独立状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyBand {
    Critica, // ≤ critical_window_days
    Proxima, // ≤ urgent_window_days
}

// ==========================================
// 期限来源 (Deadline Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeadlineSource {
    PurchaseOrderLimit, // 采购单上记录的下单期限
    StageOverride,      // 阶段实例显式开始日期
    Projected,          // 工单开工日 + 累计偏移
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_purchase_order_state_falls_back() {
        let state: PurchaseOrderState = serde_json::from_str("\"en_transito\"").unwrap();
        assert_eq!(state, PurchaseOrderState::Otro);
    }

    #[test]
    fn test_procurement_kind_defaults_to_compra() {
        let kind: ProcurementKind = serde_json::from_str("\"orden\"").unwrap();
        assert_eq!(kind, ProcurementKind::Compra);
        let kind: ProcurementKind = serde_json::from_str("\"aviso\"").unwrap();
        assert_eq!(kind, ProcurementKind::Aviso);
    }

    #[test]
    fn test_board_rank_order() {
        assert!(ProcurementStatus::Atrasado.board_rank() < ProcurementStatus::Urgente.board_rank());
        assert!(ProcurementStatus::Pendiente.board_rank() < ProcurementStatus::Pedida.board_rank());
        assert!(!ProcurementStatus::Pedida.needs_action());
    }
}
