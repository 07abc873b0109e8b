// ==========================================
// 药品废弃分析系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、分析结果模型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod analytics;
pub mod event;
pub mod reference;
pub mod types;

// 重导出核心类型
pub use analytics::{
    DailyWastePoint, DashboardSnapshot, DepartmentOption, RankedContributor, WasteEventRow,
    WasteTotals,
};
pub use event::{sort_newest_first, WasteEvent};
pub use reference::{
    Department, DepartmentWeight, Drug, DrugWeight, ReferenceData, ReferenceDataError,
    ReferenceTables,
};
pub use types::{DepartmentSelector, TimeWindow, WasteReason};
