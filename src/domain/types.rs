// ==========================================
// 药品废弃分析系统 - 领域类型定义
// ==========================================
// 职责: 废弃原因枚举、时间窗口与科室选择器
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 废弃原因 (Waste Reason)
// ==========================================
// 固定枚举集合,序列化与展示均使用原始名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WasteReason {
    Expired,       // 过期
    Overprepared,  // 配制过量
    OpenedNotUsed, // 开启未用
    Spillage,      // 洒漏
    StockRotation, // 库存轮换
    Other,         // 其他
}

impl WasteReason {
    /// 全部原因（固定顺序，用于均匀抽样）
    pub const ALL: [WasteReason; 6] = [
        WasteReason::Expired,
        WasteReason::Overprepared,
        WasteReason::OpenedNotUsed,
        WasteReason::Spillage,
        WasteReason::StockRotation,
        WasteReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteReason::Expired => "Expired",
            WasteReason::Overprepared => "Overprepared",
            WasteReason::OpenedNotUsed => "OpenedNotUsed",
            WasteReason::Spillage => "Spillage",
            WasteReason::StockRotation => "StockRotation",
            WasteReason::Other => "Other",
        }
    }
}

impl fmt::Display for WasteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WasteReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        WasteReason::ALL
            .iter()
            .copied()
            .find(|r| r.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("未知的废弃原因: {}", trimmed))
    }
}

// ==========================================
// 时间窗口 (Time Window)
// ==========================================
// 预设: 7 / 30 / 90 天; 0 表示仅今天
// 序列化为天数,反序列化同样经过上限校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TimeWindow {
    days: u32,
}

impl TimeWindow {
    pub const LAST_7_DAYS: TimeWindow = TimeWindow { days: 7 };
    pub const LAST_30_DAYS: TimeWindow = TimeWindow { days: 30 };
    pub const LAST_90_DAYS: TimeWindow = TimeWindow { days: 90 };
    pub const TODAY: TimeWindow = TimeWindow { days: 0 };

    /// 窗口上限（约十年）
    pub const MAX_DAYS: u32 = 3650;

    pub fn presets() -> [TimeWindow; 3] {
        [Self::LAST_7_DAYS, Self::LAST_30_DAYS, Self::LAST_90_DAYS]
    }

    /// 构造时间窗口，超出上限返回 None
    pub fn from_days(days: u32) -> Option<Self> {
        (days <= Self::MAX_DAYS).then_some(Self { days })
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn label(&self) -> String {
        match self.days {
            0 => "Today".to_string(),
            d => format!("Last {} days", d),
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::LAST_30_DAYS
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days)
    }
}

impl TryFrom<u32> for TimeWindow {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        TimeWindow::from_days(days)
            .ok_or_else(|| format!("时间窗口超出上限 {} 天: {}", TimeWindow::MAX_DAYS, days))
    }
}

impl From<TimeWindow> for u32 {
    fn from(window: TimeWindow) -> Self {
        window.days
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let days: u32 = trimmed
            .parse()
            .map_err(|_| format!("时间窗口必须为非负整数天数: {:?}", trimmed))?;
        TimeWindow::try_from(days)
    }
}

// ==========================================
// 科室选择器 (Department Selector)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentSelector {
    All,
    Department(String),
}

impl DepartmentSelector {
    pub const ALL_VALUE: &'static str = "all";

    /// 判断事件所属科室是否命中
    pub fn matches(&self, department_id: &str) -> bool {
        match self {
            DepartmentSelector::All => true,
            DepartmentSelector::Department(id) => id == department_id,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DepartmentSelector::All => Self::ALL_VALUE,
            DepartmentSelector::Department(id) => id,
        }
    }
}

impl Default for DepartmentSelector {
    fn default() -> Self {
        DepartmentSelector::All
    }
}

impl fmt::Display for DepartmentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DepartmentSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("科室选择不能为空".to_string());
        }
        if trimmed.eq_ignore_ascii_case(Self::ALL_VALUE) {
            Ok(DepartmentSelector::All)
        } else {
            Ok(DepartmentSelector::Department(trimmed.to_string()))
        }
    }
}
