// ==========================================
// 药品废弃分析系统 - 事件来源 Trait
// ==========================================
// 职责: 定义事件获取接口,提供合成来源与内存来源
// 红线: 不做重试; 失败以错误值返回给调用方
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::event::{sort_newest_first, WasteEvent};
use crate::domain::reference::ReferenceData;
use crate::engine::synthesizer::{EventSynthesizer, SynthesisParams};
use crate::importer::error::SourceResult;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::info;

// ==========================================
// EventSource Trait
// ==========================================
// 用途: 事件获取主接口
// 实现者: SyntheticEventSource, CsvEventSource, StaticEventSource
#[async_trait]
pub trait EventSource: Send + Sync {
    /// 获取全部事件
    ///
    /// # 返回
    /// - Ok(Vec<WasteEvent>): 事件列表（顺序不保证,由 EventStore 排序）
    /// - Err: 来源不可用、文件错误、生成失败
    async fn fetch_events(&self) -> SourceResult<Vec<WasteEvent>>;

    /// 来源名称（用于日志）
    fn name(&self) -> &str;
}

// ==========================================
// SyntheticEventSource - 合成演示事件来源
// ==========================================
pub struct SyntheticEventSource {
    reference: Arc<ReferenceData>,
    params: SynthesisParams,
    count: usize,
    days_back: u32,
    seed: Option<u64>,
    now: Option<DateTime<Local>>,
}

impl SyntheticEventSource {
    /// 创建合成来源（条数、回溯天数取自配置）
    ///
    /// # 参数
    /// - reference: 参考数据
    /// - config: 分析配置
    /// - seed: 随机种子; None 时使用系统熵
    pub fn new(reference: Arc<ReferenceData>, config: &AnalyticsConfig, seed: Option<u64>) -> Self {
        Self {
            reference,
            params: SynthesisParams::from(config),
            count: config.demo_event_count,
            days_back: config.demo_days_back,
            seed,
            now: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_days_back(mut self, days_back: u32) -> Self {
        self.days_back = days_back;
        self
    }

    /// 固定生成基准时间（默认取调用时刻）
    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = Some(now);
        self
    }
}

#[async_trait]
impl EventSource for SyntheticEventSource {
    async fn fetch_events(&self) -> SourceResult<Vec<WasteEvent>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let now = self.now.unwrap_or_else(Local::now);

        let synthesizer = EventSynthesizer::new(&self.reference, self.params);
        let events = synthesizer.generate(&mut rng, self.count, self.days_back, now)?;

        info!(
            source = self.name(),
            count = events.len(),
            days_back = self.days_back,
            seed = ?self.seed,
            "演示事件生成完成"
        );
        Ok(events)
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

// ==========================================
// StaticEventSource - 内存事件来源
// ==========================================
// 用途: 包装外部查询结果或测试数据
pub struct StaticEventSource {
    name: String,
    events: Vec<WasteEvent>,
}

impl StaticEventSource {
    pub fn new(events: Vec<WasteEvent>) -> Self {
        Self::named("static", events)
    }

    pub fn named(name: impl Into<String>, events: Vec<WasteEvent>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }
}

#[async_trait]
impl EventSource for StaticEventSource {
    async fn fetch_events(&self) -> SourceResult<Vec<WasteEvent>> {
        let mut events = self.events.clone();
        sort_newest_first(&mut events);
        Ok(events)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::demo_reference_data;
    use crate::domain::types::WasteReason;
    use crate::importer::error::SourceError;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 1, 10, 0, 0).earliest().unwrap()
    }

    #[tokio::test]
    async fn test_synthetic_source_uses_config_defaults() {
        let config = AnalyticsConfig::default();
        let source = SyntheticEventSource::new(Arc::new(demo_reference_data()), &config, Some(1))
            .with_now(fixed_now());

        let events = source.fetch_events().await.unwrap();
        assert_eq!(events.len(), config.demo_event_count);
        assert_eq!(source.name(), "synthetic");
    }

    #[tokio::test]
    async fn test_synthetic_source_seed_is_reproducible() {
        let config = AnalyticsConfig::default();
        let reference = Arc::new(demo_reference_data());
        let a = SyntheticEventSource::new(reference.clone(), &config, Some(99))
            .with_count(40)
            .with_now(fixed_now());
        let b = SyntheticEventSource::new(reference, &config, Some(99))
            .with_count(40)
            .with_now(fixed_now());

        assert_eq!(a.fetch_events().await.unwrap(), b.fetch_events().await.unwrap());
    }

    #[tokio::test]
    async fn test_synthetic_source_propagates_engine_error() {
        let config = AnalyticsConfig::default();
        let source = SyntheticEventSource::new(Arc::new(demo_reference_data()), &config, Some(1))
            .with_days_back(u32::MAX);

        let result = source.fetch_events().await;
        assert!(matches!(result, Err(SourceError::Synthesis(_))));
    }

    #[tokio::test]
    async fn test_static_source_sorts_newest_first() {
        let older = WasteEvent::new("old", fixed_now() - chrono::Duration::days(2), "A", "X", 1.0, WasteReason::Other);
        let newer = WasteEvent::new("new", fixed_now(), "A", "X", 1.0, WasteReason::Other);
        let source = StaticEventSource::named("warehouse", vec![older, newer]);

        let events = source.fetch_events().await.unwrap();
        assert_eq!(events[0].id, "new");
        assert_eq!(source.name(), "warehouse");
    }
}
