// ==========================================
// 药品废弃分析系统 - 废弃事件领域模型
// ==========================================
// 职责: 废弃事件（记录单元）
// 红线: 事件创建后不可变; 科室/药品引用可能悬空,下游必须降级处理
// ==========================================

use crate::domain::types::WasteReason;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

// ==========================================
// WasteEvent - 废弃事件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteEvent {
    pub id: String,                   // 事件ID
    pub occurred_at: DateTime<Local>, // 发生时间
    pub department_id: String,        // 科室ID (可能悬空)
    pub drug_id: String,              // 药品ID (可能悬空)
    pub volume_ml: f64,               // 废弃量 (mL, > 0)
    pub reason: WasteReason,          // 废弃原因
}

impl WasteEvent {
    /// 创建新的废弃事件
    pub fn new(
        id: impl Into<String>,
        occurred_at: DateTime<Local>,
        department_id: impl Into<String>,
        drug_id: impl Into<String>,
        volume_ml: f64,
        reason: WasteReason,
    ) -> Self {
        Self {
            id: id.into(),
            occurred_at,
            department_id: department_id.into(),
            drug_id: drug_id.into(),
            volume_ml,
            reason,
        }
    }
}

/// 按发生时间降序排序（稳定排序,同一时间保持原有顺序）
pub fn sort_newest_first(events: &mut [WasteEvent]) {
    events.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
}
