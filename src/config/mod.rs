// ==========================================
// 药品废弃分析系统 - 配置层
// ==========================================
// 职责: 分析参数配置、参考数据加载、内置演示数据
// 来源: JSON 文件 + 环境变量覆写
// ==========================================

pub mod config_manager;
pub mod demo_reference;
pub mod error;
pub mod reference_loader;

// 重导出
pub use config_manager::{config_keys, env_var_name, AnalyticsConfig, ENV_PREFIX};
pub use demo_reference::{demo_reference_data, demo_reference_tables};
pub use error::{ConfigError, ConfigResult};
pub use reference_loader::{load_reference_data, load_reference_or_demo};
