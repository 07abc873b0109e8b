// ==========================================
// 药品废弃分析系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行与外部调用方使用
// ==========================================

pub mod dashboard_api;
pub mod error;

// 重导出核心类型
pub use dashboard_api::{DashboardApi, ALL_DEPARTMENTS_LABEL};
pub use error::{ApiError, ApiResult};
