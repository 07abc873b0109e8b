// ==========================================
// 药品废弃分析系统 - 加权随机抽样
// ==========================================
// 职责: 按权重从列表中随机选取一项
// 规则: 缺失/负数/非有限权重按 0 计; 总权重 <= 0 时按 1 计
// ==========================================

use rand::Rng;

// ==========================================
// WeightedSampler - 加权抽样器
// ==========================================
// 无状态,随机源由调用方注入
pub struct WeightedSampler;

impl WeightedSampler {
    /// 加权随机选取
    ///
    /// # 参数
    /// - `rng`: 随机源
    /// - `items`: 候选列表
    /// - `weight_of`: 权重函数
    ///
    /// # 返回
    /// - 空列表返回 None
    /// - 浮点误差导致遍历结束仍未命中时,返回最后一项
    pub fn pick<'a, T, R, F>(rng: &mut R, items: &'a [T], weight_of: F) -> Option<&'a T>
    where
        R: Rng + ?Sized,
        F: Fn(&T) -> f64,
    {
        let last = items.last()?;

        let total: f64 = items.iter().map(|item| effective_weight(weight_of(item))).sum();
        let total = if total.is_finite() && total > 0.0 {
            total
        } else {
            1.0
        };

        let mut remainder = rng.gen::<f64>() * total;
        for item in items {
            remainder -= effective_weight(weight_of(item));
            if remainder <= 0.0 {
                return Some(item);
            }
        }

        Some(last)
    }
}

fn effective_weight(w: f64) -> f64 {
    if w.is_finite() && w > 0.0 {
        w
    } else {
        0.0
    }
}
