// ==========================================
// 造船工单时间线引擎 - 模板累计器
// ==========================================
// 职责: 阶段模板排序 + 计算累计开始偏移 dia_inicio
// 输入: 某产线的阶段模板（无序）
// 输出: 按 orden 升序的 AccumulatedStage 列表
// 红线: 稳定排序（同序号保持输入顺序）; 工期钳制为非负
// ==========================================

use crate::domain::line::StageTemplate;
use crate::domain::view::AccumulatedStage;
use tracing::instrument;

// ==========================================
// TemplateAccumulator - 模板累计器
// ==========================================
pub struct TemplateAccumulator {
    // 无状态引擎,不需要注入依赖
}

impl TemplateAccumulator {
    pub fn new() -> Self {
        Self {}
    }

    /// 累计阶段开始偏移
    ///
    /// 规则:
    /// 1) 按 orden 升序（缺失视为 0）,稳定排序
    /// 2) dia_inicio = 前序阶段工期之和
    /// 3) 工期 = max(0, round(dias_estimados))
    #[instrument(skip(self, templates), fields(count = templates.len()))]
    pub fn accumulate(&self, templates: &[StageTemplate]) -> Vec<AccumulatedStage> {
        let mut sorted: Vec<&StageTemplate> = templates.iter().collect();
        // sort_by_key 为稳定排序
        sorted.sort_by_key(|t| t.orden.unwrap_or(0));

        let mut acc: i64 = 0;
        sorted
            .into_iter()
            .map(|template| {
                let dias = template.duration_days();
                let stage = AccumulatedStage {
                    template: template.clone(),
                    dia_inicio: acc,
                    dias,
                };
                acc += dias;
                stage
            })
            .collect()
    }
}

impl Default for TemplateAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// 累计后的总工期（天）
pub fn total_days(stages: &[AccumulatedStage]) -> i64 {
    stages.last().map(|s| s.dia_fin()).unwrap_or(0)
}
