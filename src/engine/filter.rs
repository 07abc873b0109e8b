// ==========================================
// 药品废弃分析系统 - 事件过滤引擎
// ==========================================
// 职责: 按时间窗口与科室筛选事件
// 输出: 保持输入相对顺序的子序列; 无命中时返回空列表
// ==========================================

use crate::domain::event::WasteEvent;
use crate::domain::types::{DepartmentSelector, TimeWindow};
use chrono::{DateTime, Duration, Local, TimeZone};

// ==========================================
// FilterEngine - 过滤引擎
// ==========================================
pub struct FilterEngine {
    // 无状态引擎
}

impl FilterEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算时间窗口下界
    ///
    /// 下界 = min(now - N 天, 今日零点)
    /// - N >= 1: 即 now - N 天
    /// - N = 0: 今日零点（仅今天）
    pub fn cutoff(window: TimeWindow, now: DateTime<Local>) -> DateTime<Local> {
        let trailing = now - Duration::days(window.days() as i64);
        let start_of_today = now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
            .unwrap_or(now);
        trailing.min(start_of_today)
    }

    /// 筛选事件
    ///
    /// # 参数
    /// - `events`: 事件列表
    /// - `window`: 时间窗口
    /// - `department`: 科室选择（All 表示全部）
    /// - `now`: 当前时间
    pub fn filter(
        &self,
        events: &[WasteEvent],
        window: TimeWindow,
        department: &DepartmentSelector,
        now: DateTime<Local>,
    ) -> Vec<WasteEvent> {
        let cutoff = Self::cutoff(window, now);

        events
            .iter()
            .filter(|e| e.occurred_at >= cutoff)
            .filter(|e| department.matches(&e.department_id))
            .cloned()
            .collect()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}
