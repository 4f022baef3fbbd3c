// ==========================================
// 造船工单时间线引擎 - 产线与阶段模板
// ==========================================
// 用途: 上游提供,引擎只读
// 红线: dias_estimados 永不为负（累计时再次钳制）
// ==========================================

use crate::domain::lenient;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionLine - 产线（产品类别）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub nombre: String, // 显示名称
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub orden: Option<i64>, // 显示顺序
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub color: Option<String>, // 强调色
}

// ==========================================
// StageTemplate - 阶段模板（每条产线一组）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTemplate {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::id")]
    pub linea_id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub orden: Option<i64>, // 位置序号（可不连续,缺失视为 0）
    #[serde(default, deserialize_with = "lenient::number")]
    pub dias_estimados: f64, // 预计工期（天）
}

impl StageTemplate {
    /// 工期（天）: 四舍五入并钳制为非负
    pub fn duration_days(&self) -> i64 {
        if self.dias_estimados.is_finite() && self.dias_estimados > 0.0 {
            self.dias_estimados.round() as i64
        } else {
            0
        }
    }
}
