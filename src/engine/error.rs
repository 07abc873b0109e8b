// ==========================================
// 药品废弃分析系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("参考表为空: {0}")]
    EmptyReferenceTable(&'static str),

    #[error("参数非法 ({name}={value}): {message}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
