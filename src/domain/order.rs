// ==========================================
// 造船工单时间线引擎 - 工单 / 阶段实例 / 采购单
// ==========================================
// 用途: 上游快照,引擎只读,不做任何写回
// 关联: StageInstance → StageTemplate (linea_proceso_id, 回退 nombre)
// 关联: PurchaseOrder → StageInstance (etapa_id, 回退 etapa_nombre), 限定 obra_id
// ==========================================

use crate::domain::lenient;
use crate::domain::types::{OrderState, ProcurementKind, PurchaseOrderState, StageState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionOrder - 工单（obra）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub codigo: String,
    #[serde(default, deserialize_with = "lenient::id")]
    pub linea_id: String,
    #[serde(default, deserialize_with = "lenient::state")]
    pub estado: OrderState,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub fecha_inicio: Option<NaiveDate>, // 开工日期
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub fecha_fin_estimada: Option<NaiveDate>, // 仅展示,引擎不推导
}

// ==========================================
// StageInstance - 阶段实例（etapa）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageInstance {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::id")]
    pub obra_id: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub linea_proceso_id: Option<String>, // 对应模板 ID（可能缺失）
    #[serde(default, deserialize_with = "lenient::text")]
    pub nombre: String, // 模板关联的回退键
    #[serde(default, deserialize_with = "lenient::state")]
    pub estado: StageState,

    // ===== 采购元数据 =====
    #[serde(default, deserialize_with = "lenient::flag")]
    pub genera_orden_compra: bool,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub orden_compra_descripcion: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub orden_compra_monto_estimado: f64,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub orden_compra_dias_previo: Option<i64>, // 提前期（天）
    #[serde(default, deserialize_with = "lenient::state")]
    pub orden_compra_tipo: ProcurementKind,

    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub fecha_inicio: Option<NaiveDate>, // 显式开始日期,覆盖推算值
}

impl StageInstance {
    /// 提前期: 仅正整数有效
    pub fn lead_time_days(&self) -> Option<i64> {
        self.orden_compra_dias_previo.filter(|d| *d > 0)
    }

    pub fn is_completed(&self) -> bool {
        self.estado == StageState::Completado
    }
}

// ==========================================
// PurchaseOrder - 采购单（orden de compra）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::id")]
    pub obra_id: String,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub etapa_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub etapa_nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient::state")]
    pub estado: PurchaseOrderState,

    // ===== 时间信息 =====
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub fecha_limite_pedido: Option<NaiveDate>, // 下单期限
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub fecha_pedido: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub fecha_estimada_entrega: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::opt_date")]
    pub fecha_recepcion: Option<NaiveDate>,

    // ===== 金额 =====
    #[serde(default, deserialize_with = "lenient::number")]
    pub monto_estimado: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub monto_real: f64,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub notas: Option<String>,
}
