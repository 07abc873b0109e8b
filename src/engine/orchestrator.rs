// ==========================================
// 药品废弃分析系统 - 引擎编排器
// ==========================================
// 用途: 协调过滤 → 聚合 → 建议的执行顺序,产出看板快照
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::analytics::{DashboardSnapshot, WasteEventRow};
use crate::domain::event::WasteEvent;
use crate::domain::reference::ReferenceData;
use crate::domain::types::{DepartmentSelector, TimeWindow};
use crate::engine::{AggregationEngine, FilterEngine, RecommendationEngine};
use crate::perf::PerfGuard;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

// ==========================================
// AnalyticsQuery - 看板查询条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsQuery {
    pub window: TimeWindow,
    pub department: DepartmentSelector,
}

impl AnalyticsQuery {
    pub fn new(window: TimeWindow, department: DepartmentSelector) -> Self {
        Self { window, department }
    }
}

// ==========================================
// AnalyticsOrchestrator - 引擎编排器
// ==========================================
pub struct AnalyticsOrchestrator {
    reference: Arc<ReferenceData>,
    config: Arc<AnalyticsConfig>,
    filter: FilterEngine,
    recommender: RecommendationEngine,
}

impl AnalyticsOrchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - reference: 参考数据（只读共享）
    /// - config: 分析配置
    pub fn new(reference: Arc<ReferenceData>, config: Arc<AnalyticsConfig>) -> Self {
        Self {
            filter: FilterEngine::new(),
            recommender: RecommendationEngine::from_config(&config),
            reference,
            config,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// 执行完整分析流程
    ///
    /// # 参数
    /// - events: 全部事件（按时间降序）
    /// - query: 时间窗口与科室
    /// - now: 当前时间
    ///
    /// # 返回
    /// 看板快照; 无命中事件时为零值汇总、空序列、空排行、无建议
    pub fn run(
        &self,
        events: &[WasteEvent],
        query: &AnalyticsQuery,
        now: DateTime<Local>,
    ) -> DashboardSnapshot {
        let mut perf = PerfGuard::new("dashboard_run");

        // ==========================================
        // 步骤1: 过滤
        // ==========================================
        let filtered = self
            .filter
            .filter(events, query.window, &query.department, now);
        debug!(
            input = events.len(),
            filtered = filtered.len(),
            "步骤1: 事件过滤完成"
        );

        // ==========================================
        // 步骤2: 聚合
        // ==========================================
        let aggregation = AggregationEngine::new(&self.reference);
        let totals = aggregation.totals(&filtered);
        let time_series = aggregation.time_series(&filtered);
        let top_drugs = aggregation.top_drugs(&filtered, self.config.top_n);
        let top_departments = aggregation.top_departments(&filtered, self.config.top_n);

        // ==========================================
        // 步骤3: 建议
        // ==========================================
        let recommendations =
            self.recommender
                .recommend(&totals, &top_drugs, &top_departments, &filtered);

        // ==========================================
        // 步骤4: 最近事件表格
        // ==========================================
        let recent_events = filtered
            .iter()
            .take(self.config.recent_event_limit)
            .map(|e| WasteEventRow {
                id: e.id.clone(),
                occurred_at: e.occurred_at,
                department_name: self.reference.department_name(&e.department_id).to_string(),
                drug_name: self.reference.drug_name(&e.drug_id).to_string(),
                volume_ml: e.volume_ml,
                reason: e.reason,
                estimated_cost: aggregation.cost_of(e),
            })
            .collect();

        perf.set_items(filtered.len());

        info!(
            window_days = query.window.days(),
            department = %query.department,
            events = totals.event_count,
            total_cost = totals.total_cost,
            recommendations = recommendations.len(),
            "看板分析完成"
        );

        DashboardSnapshot {
            window_days: query.window.days(),
            department: query.department.clone(),
            generated_at: now,
            totals,
            time_series,
            top_drugs,
            top_departments,
            recommendations,
            recent_events,
        }
    }
}
