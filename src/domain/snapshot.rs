// ==========================================
// 造船工单时间线引擎 - 数据快照
// ==========================================
// 职责: 承接上游（网络/存储层）提供的集合快照
// 红线: 集合必须为数组,否则属于调用方编程错误 → 立即失败
// 说明: 单条记录内的字段异常走宽松反序列化,不阻断
// ==========================================

use crate::domain::line::{ProductionLine, StageTemplate};
use crate::domain::order::{ProductionOrder, PurchaseOrder, StageInstance};
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 集合字段名（与上游 JSON 对齐）
pub const COLLECTION_FIELDS: [&str; 5] = [
    "lineas",
    "etapas_plantilla",
    "obras",
    "etapas",
    "ordenes_compra",
];

// ==========================================
// Snapshot - 全量只读快照
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub lineas: Vec<ProductionLine>,
    #[serde(default)]
    pub etapas_plantilla: Vec<StageTemplate>,
    #[serde(default)]
    pub obras: Vec<ProductionOrder>,
    #[serde(default)]
    pub etapas: Vec<StageInstance>,
    #[serde(default)]
    pub ordenes_compra: Vec<PurchaseOrder>,
}

impl Snapshot {
    /// 从 JSON 文本加载快照
    ///
    /// # 错误
    /// - 集合字段存在但不是数组 → InvalidCollection
    /// - JSON 本身非法 → SnapshotParse
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(EngineError::SnapshotParse)?;
        Self::from_value(value)
    }

    /// 从已解析的 JSON 值加载快照
    pub fn from_value(value: Value) -> EngineResult<Self> {
        let object = value.as_object().ok_or_else(|| EngineError::InvalidCollection {
            field: "<root>".to_string(),
        })?;

        for field in COLLECTION_FIELDS {
            match object.get(field) {
                None | Some(Value::Null) | Some(Value::Array(_)) => {}
                Some(_) => {
                    return Err(EngineError::InvalidCollection {
                        field: field.to_string(),
                    })
                }
            }
        }

        let mut cleaned = object.clone();
        cleaned.retain(|_, v| !v.is_null());
        serde_json::from_value(Value::Object(cleaned)).map_err(EngineError::SnapshotParse)
    }

    // ==========================================
    // 查询辅助
    // ==========================================

    pub fn line(&self, linea_id: &str) -> Option<&ProductionLine> {
        self.lineas.iter().find(|l| l.id == linea_id)
    }

    /// 指定产线的阶段模板（保持原始顺序）
    pub fn templates_for_line(&self, linea_id: &str) -> Vec<StageTemplate> {
        self.etapas_plantilla
            .iter()
            .filter(|t| t.linea_id == linea_id)
            .cloned()
            .collect()
    }

    /// 指定工单的阶段实例
    pub fn instances_for_order(&self, obra_id: &str) -> Vec<StageInstance> {
        self.etapas
            .iter()
            .filter(|e| e.obra_id == obra_id)
            .cloned()
            .collect()
    }

    /// 指定工单的采购单
    pub fn purchase_orders_for_order(&self, obra_id: &str) -> Vec<PurchaseOrder> {
        self.ordenes_compra
            .iter()
            .filter(|oc| oc.obra_id == obra_id)
            .cloned()
            .collect()
    }

    /// 产线列表（按显示顺序,缺失排最后）
    pub fn lines_in_display_order(&self) -> Vec<&ProductionLine> {
        let mut lines: Vec<&ProductionLine> = self.lineas.iter().collect();
        lines.sort_by_key(|l| l.orden.unwrap_or(i64::MAX));
        lines
    }
}
