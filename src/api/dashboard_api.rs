// ==========================================
// 药品废弃分析系统 - 看板 API
// ==========================================
// 职责: 解析筛选参数,委托编排器生成看板快照,提供科室下拉选项
// 架构: API 层 → AnalyticsOrchestrator → 各引擎
// ==========================================

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::config::AnalyticsConfig;
use crate::domain::analytics::{DashboardSnapshot, DepartmentOption};
use crate::domain::reference::ReferenceData;
use crate::domain::types::{DepartmentSelector, TimeWindow};
use crate::engine::{AnalyticsOrchestrator, AnalyticsQuery, EventStore};
use crate::importer::EventSource;

/// "全部科室" 选项的展示名
pub const ALL_DEPARTMENTS_LABEL: &str = "All departments";

// ==========================================
// DashboardApi - 看板 API
// ==========================================
pub struct DashboardApi {
    orchestrator: AnalyticsOrchestrator,
    store: EventStore,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - reference: 参考数据
    /// - config: 分析配置
    /// - store: 事件存放区
    pub fn new(reference: Arc<ReferenceData>, config: Arc<AnalyticsConfig>, store: EventStore) -> Self {
        Self {
            orchestrator: AnalyticsOrchestrator::new(reference, config),
            store,
        }
    }

    /// 从事件来源加载并创建实例
    ///
    /// # 返回
    /// - Err(ApiError::EventSource): 来源获取失败（不重试）
    pub async fn load(
        reference: Arc<ReferenceData>,
        config: Arc<AnalyticsConfig>,
        source: &dyn EventSource,
    ) -> ApiResult<Self> {
        let events = source.fetch_events().await?;
        info!(source = source.name(), count = events.len(), "事件加载完成");
        Ok(Self::new(reference, config, EventStore::from_events(events)))
    }

    // ==========================================
    // 看板查询接口
    // ==========================================

    /// 查询看板（以当前时间为基准）
    ///
    /// # 参数
    /// - range: 时间窗口天数（"7" / "30" / "90",0 表示仅今天）
    /// - department: 科室ID,或 "all"
    pub fn get_dashboard(&self, range: &str, department: &str) -> ApiResult<DashboardSnapshot> {
        self.get_dashboard_at(range, department, Local::now())
    }

    /// 查询看板（指定基准时间）
    #[instrument(skip(self, now))]
    pub fn get_dashboard_at(
        &self,
        range: &str,
        department: &str,
        now: DateTime<Local>,
    ) -> ApiResult<DashboardSnapshot> {
        let query = parse_query(range, department)?;
        Ok(self.query_at(&query, now))
    }

    /// 使用默认条件查询（配置中的默认窗口 + 全部科室）
    pub fn get_default_dashboard(&self) -> DashboardSnapshot {
        let query = AnalyticsQuery::new(
            self.orchestrator.config().default_window(),
            DepartmentSelector::All,
        );
        self.query_at(&query, Local::now())
    }

    /// 使用已解析的查询条件
    pub fn query_at(&self, query: &AnalyticsQuery, now: DateTime<Local>) -> DashboardSnapshot {
        self.orchestrator.run(self.store.events(), query, now)
    }

    // ==========================================
    // 辅助查询接口
    // ==========================================

    /// 科室下拉选项（首项为全部科室）
    pub fn department_options(&self) -> Vec<DepartmentOption> {
        std::iter::once(DepartmentOption {
            value: DepartmentSelector::ALL_VALUE.to_string(),
            label: ALL_DEPARTMENTS_LABEL.to_string(),
        })
        .chain(
            self.orchestrator
                .reference()
                .departments()
                .iter()
                .map(|d| DepartmentOption {
                    value: d.id.clone(),
                    label: d.name.clone(),
                }),
        )
        .collect()
    }

    /// 时间窗口预设选项
    pub fn window_options(&self) -> Vec<TimeWindow> {
        TimeWindow::presets().to_vec()
    }

    pub fn event_count(&self) -> usize {
        self.store.len()
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }
}

/// 解析筛选参数
fn parse_query(range: &str, department: &str) -> ApiResult<AnalyticsQuery> {
    let window = TimeWindow::from_str(range).map_err(ApiError::InvalidInput)?;
    let department = DepartmentSelector::from_str(department).map_err(ApiError::InvalidInput)?;
    Ok(AnalyticsQuery::new(window, department))
}
