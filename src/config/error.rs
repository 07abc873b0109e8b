// ==========================================
// 药品废弃分析系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::reference::ReferenceDataError;
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件相关错误 =====
    #[error("配置文件读取失败 (path={path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件解析失败 (path={path}): {message}")]
    ParseError { path: String, message: String },

    // ===== 配置值错误 =====
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    // ===== 参考数据错误 =====
    #[error("参考数据非法: {0}")]
    InvalidReferenceData(#[from] ReferenceDataError),
}

impl ConfigError {
    pub(crate) fn invalid_value(key: &str, value: impl ToString, message: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
