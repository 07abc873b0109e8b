// ==========================================
// 药品废弃分析系统 - 核心库
// ==========================================
// 系统定位: 决策支持 (废弃成本/用量分析与改进建议)
// 流程: 事件来源 → 事件存放区 → 过滤 → 聚合 → 建议 → 看板快照
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 事件来源层 - 外部数据
pub mod importer;

// 配置层 - 分析参数与参考数据
pub mod config;

// 日志系统
pub mod logging;

// 性能日志
pub mod perf;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DepartmentSelector, TimeWindow, WasteReason};

// 领域实体
pub use domain::{
    DailyWastePoint, DashboardSnapshot, DepartmentOption, RankedContributor, ReferenceData,
    WasteEvent, WasteEventRow, WasteTotals,
};

// 配置
pub use config::AnalyticsConfig;

// 引擎
pub use engine::{
    AggregationEngine, AnalyticsOrchestrator, AnalyticsQuery, EventStore, EventSynthesizer,
    FilterEngine, RecommendationEngine, WeightedSampler,
};

// 事件来源
pub use importer::{CsvEventSource, EventSource, StaticEventSource, SyntheticEventSource};

// API
pub use api::{ApiError, ApiResult, DashboardApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "药品废弃分析系统";
