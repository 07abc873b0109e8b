// ==========================================
// 药品废弃分析系统 - 分析结果模型
// ==========================================
// 职责: 汇总指标、日序列、排行、看板快照（纯数据,供展示层使用）
// ==========================================

use crate::domain::types::{DepartmentSelector, WasteReason};
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// WasteTotals - 周期汇总指标 (KPI)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WasteTotals {
    pub total_volume_ml: f64,
    pub total_cost: f64,
    pub event_count: usize,
    pub avg_cost_per_event: f64, // event_count 为 0 时为 0
}

// ==========================================
// DailyWastePoint - 日序列数据点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWastePoint {
    pub day: NaiveDate, // 本地日期 (YYYY-MM-DD)
    pub cost: f64,
    pub volume_ml: f64,
    pub event_count: usize,
}

impl DailyWastePoint {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            cost: 0.0,
            volume_ml: 0.0,
            event_count: 0,
        }
    }
}

// ==========================================
// RankedContributor - 排行项（药品或科室）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedContributor {
    pub key: String,  // 分组键 (drug_id / department_id)
    pub name: String, // 展示名 (未知时为原始ID)
    pub cost: f64,
    pub volume_ml: f64,
    pub event_count: usize,
}

impl RankedContributor {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            cost: 0.0,
            volume_ml: 0.0,
            event_count: 0,
        }
    }

    /// 占总成本比例,总成本为 0 时按 1 计算
    pub fn cost_share(&self, total_cost: f64) -> f64 {
        let denom = if total_cost > 0.0 { total_cost } else { 1.0 };
        self.cost / denom
    }
}

// ==========================================
// WasteEventRow - 最近事件表格行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteEventRow {
    pub id: String,
    pub occurred_at: DateTime<Local>,
    pub department_name: String,
    pub drug_name: String,
    pub volume_ml: f64,
    pub reason: WasteReason,
    pub estimated_cost: f64,
}

// ==========================================
// DepartmentOption - 科室下拉选项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentOption {
    pub value: String,
    pub label: String,
}

// ==========================================
// DashboardSnapshot - 看板快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub window_days: u32,
    pub department: DepartmentSelector,
    pub generated_at: DateTime<Local>,
    pub totals: WasteTotals,
    pub time_series: Vec<DailyWastePoint>,
    pub top_drugs: Vec<RankedContributor>,
    pub top_departments: Vec<RankedContributor>,
    pub recommendations: Vec<String>,
    pub recent_events: Vec<WasteEventRow>,
}

impl DashboardSnapshot {
    pub fn is_empty(&self) -> bool {
        self.totals.event_count == 0
    }
}
