// ==========================================
// 药品废弃分析系统 - 演示事件生成引擎
// ==========================================
// 职责: 按科室用量权重与科室药品画像生成合成废弃事件
// 输入: 参考数据、生成参数、随机源、当前时间
// 输出: 按时间降序排列的废弃事件
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::event::{sort_newest_first, WasteEvent};
use crate::domain::reference::ReferenceData;
use crate::domain::types::{TimeWindow, WasteReason};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::sampler::WeightedSampler;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use rand::Rng;
use tracing::instrument;

/// 四舍五入到 0.1 mL 后的最小废弃量
pub const MIN_EVENT_VOLUME_ML: f64 = 0.1;

// ==========================================
// SynthesisParams - 生成参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisParams {
    pub volume_fraction_exponent: f64,
    pub min_volume_fraction: f64,
    pub fallback_vial_volume_ml: f64,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self::from(&AnalyticsConfig::default())
    }
}

impl From<&AnalyticsConfig> for SynthesisParams {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            volume_fraction_exponent: config.volume_fraction_exponent,
            min_volume_fraction: config.min_volume_fraction,
            fallback_vial_volume_ml: config.fallback_vial_volume_ml,
        }
    }
}

// ==========================================
// EventSynthesizer - 演示事件生成器
// ==========================================
pub struct EventSynthesizer<'a> {
    reference: &'a ReferenceData,
    params: SynthesisParams,
}

impl<'a> EventSynthesizer<'a> {
    /// 创建生成器
    ///
    /// # 参数
    /// - reference: 参考数据（科室权重、药品画像、瓶装容量）
    /// - params: 生成参数
    pub fn new(reference: &'a ReferenceData, params: SynthesisParams) -> Self {
        Self { reference, params }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成 `count` 条事件,时间位于 `[now - days_back, now]`
    ///
    /// 每条事件:
    /// 1) 在 [0, days_back] 中均匀抽取天偏移,再在当天落入窗口的时段内抽取分钟
    /// 2) 按科室权重抽取科室
    /// 3) 按该科室药品画像抽取药品（无画像时全目录等权）
    /// 4) 废弃量 = 瓶装容量 × max(下限, U^指数),保留一位小数
    /// 5) 原因在固定集合中均匀抽取
    ///
    /// # 返回
    /// 按发生时间降序排列的事件列表
    #[instrument(skip(self, rng, now))]
    pub fn generate<R>(
        &self,
        rng: &mut R,
        count: usize,
        days_back: u32,
        now: DateTime<Local>,
    ) -> EngineResult<Vec<WasteEvent>>
    where
        R: Rng + ?Sized,
    {
        if days_back > TimeWindow::MAX_DAYS {
            return Err(EngineError::InvalidParameter {
                name: "days_back",
                value: days_back.to_string(),
                message: format!("不能超过 {} 天", TimeWindow::MAX_DAYS),
            });
        }

        let mut events = Vec::with_capacity(count);
        for index in 0..count {
            events.push(self.generate_one(rng, index, days_back, now)?);
        }

        sort_newest_first(&mut events);

        tracing::debug!(generated = events.len(), "演示事件生成完成");
        Ok(events)
    }

    fn generate_one<R>(
        &self,
        rng: &mut R,
        index: usize,
        days_back: u32,
        now: DateTime<Local>,
    ) -> EngineResult<WasteEvent>
    where
        R: Rng + ?Sized,
    {
        let occurred_at = draw_timestamp(rng, days_back, now);

        let department_id = WeightedSampler::pick(rng, self.reference.department_weights(), |w| {
            w.weight
        })
        .map(|w| w.department_id.clone())
        .ok_or(EngineError::EmptyReferenceTable("department_weights"))?;

        let drug_id = WeightedSampler::pick(rng, self.reference.drug_profile(&department_id), |w| {
            w.weight
        })
        .map(|w| w.drug_id.clone())
        .ok_or(EngineError::EmptyReferenceTable("drugs"))?;

        let volume_ml = self.draw_volume(rng, &drug_id);
        let reason = WasteReason::ALL[rng.gen_range(0..WasteReason::ALL.len())];
        let id = format!("we_{}_{:08x}", index, rng.gen::<u32>());

        Ok(WasteEvent {
            id,
            occurred_at,
            department_id,
            drug_id,
            volume_ml,
            reason,
        })
    }

    /// 抽取废弃量（偏向瓶装容量的小比例）
    fn draw_volume<R>(&self, rng: &mut R, drug_id: &str) -> f64
    where
        R: Rng + ?Sized,
    {
        let vial_ml = self
            .reference
            .vial_volume_ml(drug_id)
            .unwrap_or(self.params.fallback_vial_volume_ml);

        let u: f64 = rng.gen();
        let fraction = u
            .powf(self.params.volume_fraction_exponent)
            .max(self.params.min_volume_fraction);

        round_to_tenth(vial_ml * fraction).max(MIN_EVENT_VOLUME_ML)
    }
}

/// 抽取时间戳,结果位于 [now - days_back, now]
///
/// 先抽天偏移,再在"当天 ∩ 窗口"内按分钟均匀抽取。
/// 首尾两天只在窗口覆盖的时段内取值,不做钳制。
fn draw_timestamp<R>(rng: &mut R, days_back: u32, now: DateTime<Local>) -> DateTime<Local>
where
    R: Rng + ?Sized,
{
    let window_start = now - Duration::days(days_back as i64);
    let day_offset = rng.gen_range(0..=days_back) as i64;
    let day = (now - Duration::days(day_offset)).date_naive();

    let day_start = local_midnight(day).unwrap_or(window_start);
    let day_end = day.succ_opt().and_then(local_midnight).unwrap_or(now);
    let lower = day_start.max(window_start);
    let upper = day_end.min(now);

    let span_minutes = (upper - lower).num_minutes();
    if span_minutes <= 0 {
        return lower;
    }
    lower + Duration::minutes(rng.gen_range(0..span_minutes))
}

fn local_midnight(day: NaiveDate) -> Option<DateTime<Local>> {
    day.and_hms_opt(0, 0, 0)
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
