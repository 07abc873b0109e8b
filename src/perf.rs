use std::cell::Cell;
use std::sync::OnceLock;
use std::time::Instant;

/// 性能日志开关环境变量
pub const PERF_ENV_VAR: &str = "PHARMA_WASTE_PERF";

static PERF_ENABLED: OnceLock<bool> = OnceLock::new();

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 性能日志是否开启
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭
/// - `PHARMA_WASTE_PERF=1` 强制开启, `PHARMA_WASTE_PERF=0` 强制关闭
///
/// 首次调用时读取环境变量，之后不再变化
pub fn perf_enabled() -> bool {
    *PERF_ENABLED.get_or_init(|| match std::env::var(PERF_ENV_VAR) {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    })
}

/// 性能统计 Guard：记录 elapsed_ms + 处理条数 + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let mut perf = pharma_waste_analytics::perf::PerfGuard::new("dashboard_run");
/// // do work...
/// perf.set_items(events.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    items: Option<usize>,
    depth: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let next = d.get().saturating_add(1);
            d.set(next);
            next
        });
        Self {
            op,
            start: Instant::now(),
            items: None,
            depth,
        }
    }

    pub fn with_items(op: &'static str, items: usize) -> Self {
        let mut guard = Self::new(op);
        guard.items = Some(items);
        guard
    }

    /// 记录处理条数（可在工作完成后补充）
    pub fn set_items(&mut self, items: usize) {
        self.items = Some(items);
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if perf_enabled() {
            let elapsed_ms = self.start.elapsed().as_millis() as u64;
            tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                items = self.items.unwrap_or(0),
                depth = self.depth,
                "done"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
