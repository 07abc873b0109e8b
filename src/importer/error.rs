// ==========================================
// 药品废弃分析系统 - 事件来源错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::engine::error::EngineError;
use thiserror::Error;

/// 事件来源错误类型
#[derive(Error, Debug)]
pub enum SourceError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("CSV 缺少必需列: {0}")]
    MissingColumn(String),

    // ===== 行级错误（严格模式） =====
    #[error("行数据非法 (行 {row}, 字段 {field}): {message}")]
    RowError {
        row: usize,
        field: String,
        message: String,
    },

    // ===== 外部来源 =====
    #[error("事件获取失败 ({source_name}): {message}")]
    FetchFailed {
        source_name: String,
        message: String,
    },

    #[error("演示事件生成失败: {0}")]
    Synthesis(#[from] EngineError),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for SourceError {
    fn from(err: csv::Error) -> Self {
        SourceError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type SourceResult<T> = Result<T, SourceError>;
