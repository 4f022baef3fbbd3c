// ==========================================
// 造船工单时间线引擎 - 派生视图对象
// ==========================================
// 职责: 引擎输出（不落库）
// - AccumulatedStage: 模板 + 累计开始偏移
// - StageView: 单阶段完整视图（供看板渲染）
// - ParsedItem: 采购描述拆分结果
// ==========================================

use crate::domain::line::StageTemplate;
use crate::domain::order::{PurchaseOrder, StageInstance};
use crate::domain::types::{DeadlineSource, ProcurementStatus, UrgencyBand};
use chrono::NaiveDate;
use serde::Serialize;

/// 带累计偏移的阶段模板
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccumulatedStage {
    pub template: StageTemplate,
    /// 距工单开工日的累计偏移（天,从 0 开始）
    pub dia_inicio: i64,
    /// 钳制后的工期（天）
    pub dias: i64,
}

impl AccumulatedStage {
    /// 阶段结束偏移（不含）
    pub fn dia_fin(&self) -> i64 {
        self.dia_inicio + self.dias
    }

    /// 指定工单天数是否落在本阶段窗口内
    pub fn contains_day(&self, day: i64) -> bool {
        if self.dias == 0 {
            return day == self.dia_inicio;
        }
        day >= self.dia_inicio && day < self.dia_fin()
    }
}

/// 采购期限
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deadline {
    pub date: NaiveDate,
    pub source: DeadlineSource,
}

/// 采购状态分类结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageClassification {
    pub status: ProcurementStatus,
    pub urgent: bool,
    pub overdue: bool,
    /// 距下单期限的天数（正数 = 未来）,无时间信息时为 None
    pub days_remaining: Option<i64>,
    /// 展示用紧急子档
    pub band: Option<UrgencyBand>,
    /// 命中的规则标识（可解释性）
    pub rule: &'static str,
}

/// 单阶段视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageView {
    /// 模板位置信息；未关联模板的实例为 None
    pub stage: Option<AccumulatedStage>,
    pub instance: Option<StageInstance>,
    pub purchase_order: Option<PurchaseOrder>,
    /// 推算（或显式）开始日期
    pub start_date: Option<NaiveDate>,
    /// 推算结束日期
    pub end_date: Option<NaiveDate>,
    pub deadline: Option<Deadline>,
    /// 仅采购相关阶段有分类结果
    pub classification: Option<StageClassification>,
}

impl StageView {
    /// 展示名称: 优先模板名,回退实例名
    pub fn nombre(&self) -> &str {
        self.stage
            .as_ref()
            .map(|s| s.template.nombre.as_str())
            .or_else(|| self.instance.as_ref().map(|i| i.nombre.as_str()))
            .unwrap_or("")
    }

    pub fn dia_inicio(&self) -> Option<i64> {
        self.stage.as_ref().map(|s| s.dia_inicio)
    }

    pub fn status(&self) -> Option<ProcurementStatus> {
        self.classification.as_ref().map(|c| c.status)
    }

    pub fn is_procurement(&self) -> bool {
        self.classification.is_some()
    }
}

/// 采购描述拆分项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedItem {
    pub title: Option<String>,
    pub body: String,
    /// 安装备注（仅 parse_with_notes 抽取）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nota: Option<String>,
}

impl ParsedItem {
    pub fn new(title: Option<String>, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
            nota: None,
        }
    }

    /// 渲染为单行文本（TITLE: body）
    pub fn render(&self) -> String {
        match &self.title {
            Some(title) => format!("{}: {}", title, self.body),
            None => self.body.clone(),
        }
    }
}
