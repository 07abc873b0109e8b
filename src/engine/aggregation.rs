// ==========================================
// 药品废弃分析系统 - 聚合引擎
// ==========================================
// 职责: 汇总指标 (KPI)、日序列、Top-N 排行
// 输入: 已过滤的事件列表 + 参考数据
// 输出: WasteTotals / Vec<DailyWastePoint> / Vec<RankedContributor>
// ==========================================
// 成本 = 废弃量 × 药品单位成本; 未知药品单位成本按 0 计
// 分组顺序: 首次出现顺序; 排行按成本降序稳定排序
// ==========================================

use crate::domain::analytics::{DailyWastePoint, RankedContributor, WasteTotals};
use crate::domain::event::WasteEvent;
use crate::domain::reference::ReferenceData;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// 排行默认条数
pub const DEFAULT_TOP_N: usize = 6;

// ==========================================
// AggregationEngine - 聚合引擎
// ==========================================
// 无状态引擎,所有方法都是纯函数
pub struct AggregationEngine<'a> {
    reference: &'a ReferenceData,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// 单条事件成本
    pub fn cost_of(&self, event: &WasteEvent) -> f64 {
        event.volume_ml * self.reference.cost_rate(&event.drug_id)
    }

    // ==========================================
    // 汇总指标
    // ==========================================

    /// 计算周期汇总指标
    pub fn totals(&self, events: &[WasteEvent]) -> WasteTotals {
        let mut total_volume_ml = 0.0;
        let mut total_cost = 0.0;

        for e in events {
            total_volume_ml += e.volume_ml;
            total_cost += self.cost_of(e);
        }

        let event_count = events.len();
        let avg_cost_per_event = if event_count > 0 {
            total_cost / event_count as f64
        } else {
            0.0
        };

        WasteTotals {
            total_volume_ml,
            total_cost,
            event_count,
            avg_cost_per_event,
        }
    }

    // ==========================================
    // 日序列
    // ==========================================

    /// 按本地日期分组累加,按日期升序返回
    pub fn time_series(&self, events: &[WasteEvent]) -> Vec<DailyWastePoint> {
        let mut by_day: BTreeMap<_, DailyWastePoint> = BTreeMap::new();

        for e in events {
            let day = e.occurred_at.date_naive();
            let point = by_day
                .entry(day)
                .or_insert_with(|| DailyWastePoint::new(day));
            point.cost += self.cost_of(e);
            point.volume_ml += e.volume_ml;
            point.event_count += 1;
        }

        by_day.into_values().collect()
    }

    // ==========================================
    // Top-N 排行
    // ==========================================

    /// 按键分组求和,按成本降序取前 n 项
    ///
    /// # 参数
    /// - `events`: 事件列表
    /// - `key_of`: 分组键
    /// - `name_of`: 分组键 → 展示名
    /// - `n`: 最大返回条数
    pub fn top_n<K, N>(
        &self,
        events: &[WasteEvent],
        key_of: K,
        name_of: N,
        n: usize,
    ) -> Vec<RankedContributor>
    where
        K: Fn(&WasteEvent) -> &str,
        N: Fn(&str) -> String,
    {
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<RankedContributor> = Vec::new();

        for e in events {
            let key = key_of(e);
            let slot = match slots.get(key) {
                Some(&slot) => slot,
                None => {
                    groups.push(RankedContributor::new(key, name_of(key)));
                    slots.insert(key.to_string(), groups.len() - 1);
                    groups.len() - 1
                }
            };

            let group = &mut groups[slot];
            group.cost += self.cost_of(e);
            group.volume_ml += e.volume_ml;
            group.event_count += 1;
        }

        groups.sort_by(|a, b| b.cost.partial_cmp(&a.cost).unwrap_or(Ordering::Equal));
        groups.truncate(n);
        groups
    }

    /// 药品排行（未知药品以原始ID展示）
    pub fn top_drugs(&self, events: &[WasteEvent], n: usize) -> Vec<RankedContributor> {
        self.top_n(
            events,
            |e| e.drug_id.as_str(),
            |id| self.reference.drug_name(id).to_string(),
            n,
        )
    }

    /// 科室排行（未知科室以原始ID展示）
    pub fn top_departments(&self, events: &[WasteEvent], n: usize) -> Vec<RankedContributor> {
        self.top_n(
            events,
            |e| e.department_id.as_str(),
            |id| self.reference.department_name(id).to_string(),
            n,
        )
    }
}

#[cfg(test)]
mod tests;
