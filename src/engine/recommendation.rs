// ==========================================
// 药品废弃分析系统 - 建议生成引擎
// ==========================================
// 职责: 根据排行与原因分布生成可执行建议
// 输出: 最多 max_recommendations 条,顺序固定 (药品 → 科室 → 原因)
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::analytics::{RankedContributor, WasteTotals};
use crate::domain::event::WasteEvent;
use crate::domain::types::WasteReason;

// ==========================================
// RecommendationEngine - 建议引擎
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendationEngine {
    share_threshold: f64,
    max_recommendations: usize,
}

impl RecommendationEngine {
    /// 创建建议引擎
    ///
    /// # 参数
    /// - share_threshold: 成本占比阈值（严格大于时给出占比型建议）
    /// - max_recommendations: 建议条数上限
    pub fn new(share_threshold: f64, max_recommendations: usize) -> Self {
        Self {
            share_threshold,
            max_recommendations,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.share_threshold, config.max_recommendations)
    }

    /// 生成建议
    ///
    /// # 参数
    /// - totals: 周期汇总指标（取 total_cost 作为分母）
    /// - top_drugs / top_departments: 已按成本降序排列的排行
    /// - events: 已过滤的事件（用于统计原因）
    pub fn recommend(
        &self,
        totals: &WasteTotals,
        top_drugs: &[RankedContributor],
        top_departments: &[RankedContributor],
        events: &[WasteEvent],
    ) -> Vec<String> {
        let mut recs = Vec::new();

        if let Some(drug) = top_drugs.first() {
            let share = drug.cost_share(totals.total_cost);
            if share > self.share_threshold {
                recs.push(format!(
                    "Investigate preparation practices for {}. It accounts for ~{}% of waste cost in the selected period.",
                    drug.name,
                    percent(share)
                ));
            } else {
                recs.push(format!(
                    "Top waste contributor is {}. Review ordering and prep volumes for this drug.",
                    drug.name
                ));
            }
        }

        if let Some(dept) = top_departments.first() {
            let share = dept.cost_share(totals.total_cost);
            if share > self.share_threshold {
                recs.push(format!(
                    "Focus on {}. It contributes ~{}% of waste cost.",
                    dept.name,
                    percent(share)
                ));
            } else {
                recs.push(format!(
                    "Highest-waste department is {}. Consider a short audit of workflows and stock rotation.",
                    dept.name
                ));
            }
        }

        if let Some(reason) = most_common_reason(events) {
            recs.push(format!(
                "Most common reason: {}. Target this cause first for a quick win.",
                reason
            ));
        }

        recs.truncate(self.max_recommendations);
        recs
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::from_config(&AnalyticsConfig::default())
    }
}

/// 出现次数最多的原因; 并列时取最先出现者
pub fn most_common_reason(events: &[WasteEvent]) -> Option<WasteReason> {
    let mut tally: Vec<(WasteReason, usize)> = Vec::new();
    for e in events {
        match tally.iter_mut().find(|(r, _)| *r == e.reason) {
            Some((_, n)) => *n += 1,
            None => tally.push((e.reason, 1)),
        }
    }

    let mut best: Option<(WasteReason, usize)> = None;
    for (reason, n) in tally {
        if best.map_or(true, |(_, top)| n > top) {
            best = Some((reason, n));
        }
    }
    best.map(|(reason, _)| reason)
}

fn percent(share: f64) -> i64 {
    (share * 100.0).round() as i64
}
