// ==========================================
// 药品废弃分析系统 - 参考数据加载
// ==========================================
// 职责: 从 JSON 文件加载并校验参考数据; 未指定文件时使用内置演示数据
// ==========================================

use crate::config::demo_reference::demo_reference_data;
use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::reference::{ReferenceData, ReferenceTables};
use std::fs;
use std::path::Path;

/// 从 JSON 文件加载参考数据
///
/// # 参数
/// - path: 参考数据文件路径（格式同 ReferenceTables）
pub fn load_reference_data(path: impl AsRef<Path>) -> ConfigResult<ReferenceData> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let tables: ReferenceTables =
        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let data = ReferenceData::new(tables)?;

    tracing::info!(
        path = %path.display(),
        departments = data.departments().len(),
        drugs = data.drugs().len(),
        "已加载参考数据"
    );
    Ok(data)
}

/// 加载参考数据: 指定路径时读取文件,否则使用内置演示数据
pub fn load_reference_or_demo(path: Option<&Path>) -> ConfigResult<ReferenceData> {
    match path {
        Some(p) => load_reference_data(p),
        None => {
            tracing::debug!("未指定参考数据文件,使用内置演示数据");
            Ok(demo_reference_data())
        }
    }
}
