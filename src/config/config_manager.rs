// ==========================================
// 药品废弃分析系统 - 分析配置
// ==========================================
// 职责: 配置加载、环境变量覆写、校验
// 来源优先级: 环境变量 > JSON 配置文件 > 内置默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::TimeWindow;
use crate::engine::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PHARMA_WASTE_";

// ==========================================
// AnalyticsConfig - 分析配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    // ===== 演示数据生成 =====
    pub volume_fraction_exponent: f64, // 废弃比例指数 (越大越偏向小比例)
    pub min_volume_fraction: f64,      // 废弃比例下限
    pub fallback_vial_volume_ml: f64,  // 无瓶装容量时的默认值
    pub demo_event_count: usize,
    pub demo_days_back: u32,

    // ===== 排行与建议 =====
    pub share_threshold: f64, // 建议触发的成本占比阈值
    pub top_n: usize,
    pub max_recommendations: usize,

    // ===== 看板 =====
    pub recent_event_limit: usize,
    pub default_window_days: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            volume_fraction_exponent: 0.7,
            min_volume_fraction: 0.05,
            fallback_vial_volume_ml: 10.0,
            demo_event_count: 220,
            demo_days_back: 90,
            share_threshold: 0.25,
            top_n: DEFAULT_TOP_N,
            max_recommendations: 3,
            recent_event_limit: 12,
            default_window_days: 30,
        }
    }
}

impl AnalyticsConfig {
    /// 建议条数上限
    pub const MAX_RECOMMENDATIONS: usize = 3;

    /// 从 JSON 文件加载配置（缺省字段使用默认值）,随后应用环境变量覆写并校验
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn load_from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut config: AnalyticsConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        config.apply_env_overrides()?;
        config.validate()?;

        tracing::info!(path = %path.display(), "已加载分析配置");
        Ok(config)
    }

    /// 内置默认值 + 环境变量覆写
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// 应用进程环境变量覆写 (PHARMA_WASTE_<KEY>)
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_with(|key| std::env::var(env_var_name(key)).ok())
    }

    /// 按键查询覆写值
    ///
    /// # 参数
    /// - lookup: 配置键 → 覆写值（None 表示不覆写）
    pub fn apply_overrides_with<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        use config_keys::*;

        if let Some(v) = lookup(VOLUME_FRACTION_EXPONENT) {
            self.volume_fraction_exponent = parse_value(VOLUME_FRACTION_EXPONENT, &v)?;
        }
        if let Some(v) = lookup(MIN_VOLUME_FRACTION) {
            self.min_volume_fraction = parse_value(MIN_VOLUME_FRACTION, &v)?;
        }
        if let Some(v) = lookup(FALLBACK_VIAL_VOLUME_ML) {
            self.fallback_vial_volume_ml = parse_value(FALLBACK_VIAL_VOLUME_ML, &v)?;
        }
        if let Some(v) = lookup(DEMO_EVENT_COUNT) {
            self.demo_event_count = parse_value(DEMO_EVENT_COUNT, &v)?;
        }
        if let Some(v) = lookup(DEMO_DAYS_BACK) {
            self.demo_days_back = parse_value(DEMO_DAYS_BACK, &v)?;
        }
        if let Some(v) = lookup(SHARE_THRESHOLD) {
            self.share_threshold = parse_value(SHARE_THRESHOLD, &v)?;
        }
        if let Some(v) = lookup(TOP_N) {
            self.top_n = parse_value(TOP_N, &v)?;
        }
        if let Some(v) = lookup(MAX_RECOMMENDATIONS) {
            self.max_recommendations = parse_value(MAX_RECOMMENDATIONS, &v)?;
        }
        if let Some(v) = lookup(RECENT_EVENT_LIMIT) {
            self.recent_event_limit = parse_value(RECENT_EVENT_LIMIT, &v)?;
        }
        if let Some(v) = lookup(DEFAULT_WINDOW_DAYS) {
            self.default_window_days = parse_value(DEFAULT_WINDOW_DAYS, &v)?;
        }

        Ok(())
    }

    /// 校验配置取值范围
    pub fn validate(&self) -> ConfigResult<()> {
        use config_keys::*;

        if !self.volume_fraction_exponent.is_finite() || self.volume_fraction_exponent <= 0.0 {
            return Err(ConfigError::invalid_value(
                VOLUME_FRACTION_EXPONENT,
                self.volume_fraction_exponent,
                "必须为正数",
            ));
        }
        if !(self.min_volume_fraction > 0.0 && self.min_volume_fraction <= 1.0) {
            return Err(ConfigError::invalid_value(
                MIN_VOLUME_FRACTION,
                self.min_volume_fraction,
                "必须位于 (0, 1]",
            ));
        }
        if !self.fallback_vial_volume_ml.is_finite() || self.fallback_vial_volume_ml <= 0.0 {
            return Err(ConfigError::invalid_value(
                FALLBACK_VIAL_VOLUME_ML,
                self.fallback_vial_volume_ml,
                "必须为正数",
            ));
        }
        if !(0.0..=1.0).contains(&self.share_threshold) {
            return Err(ConfigError::invalid_value(
                SHARE_THRESHOLD,
                self.share_threshold,
                "必须位于 [0, 1]",
            ));
        }
        if self.top_n == 0 {
            return Err(ConfigError::invalid_value(TOP_N, self.top_n, "至少为 1"));
        }
        if self.max_recommendations > Self::MAX_RECOMMENDATIONS {
            return Err(ConfigError::invalid_value(
                MAX_RECOMMENDATIONS,
                self.max_recommendations,
                "不能超过 3",
            ));
        }
        if self.default_window_days > TimeWindow::MAX_DAYS {
            return Err(ConfigError::invalid_value(
                DEFAULT_WINDOW_DAYS,
                self.default_window_days,
                "超出时间窗口上限",
            ));
        }
        if self.demo_days_back > TimeWindow::MAX_DAYS {
            return Err(ConfigError::invalid_value(
                DEMO_DAYS_BACK,
                self.demo_days_back,
                "超出时间窗口上限",
            ));
        }

        Ok(())
    }

    /// 默认时间窗口
    pub fn default_window(&self) -> TimeWindow {
        TimeWindow::from_days(self.default_window_days).unwrap_or_default()
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, raw: &str) -> ConfigResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::invalid_value(key, raw, "无法解析"))
}

/// 配置键对应的环境变量名
pub fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.to_uppercase())
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 演示数据生成
    pub const VOLUME_FRACTION_EXPONENT: &str = "volume_fraction_exponent";
    pub const MIN_VOLUME_FRACTION: &str = "min_volume_fraction";
    pub const FALLBACK_VIAL_VOLUME_ML: &str = "fallback_vial_volume_ml";
    pub const DEMO_EVENT_COUNT: &str = "demo_event_count";
    pub const DEMO_DAYS_BACK: &str = "demo_days_back";

    // 排行与建议
    pub const SHARE_THRESHOLD: &str = "share_threshold";
    pub const TOP_N: &str = "top_n";
    pub const MAX_RECOMMENDATIONS: &str = "max_recommendations";

    // 看板
    pub const RECENT_EVENT_LIMIT: &str = "recent_event_limit";
    pub const DEFAULT_WINDOW_DAYS: &str = "default_window_days";
}
