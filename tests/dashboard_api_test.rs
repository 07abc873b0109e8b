// ==========================================
// DashboardApi 集成测试
// ==========================================
// 测试范围:
// 1. 加载: 合成来源 / 内存来源 / CSV 来源失败
// 2. 查询: 时间窗口与科室参数解析、未知科室、非法输入
// 3. 辅助: 科室下拉选项、事件计数
// ==========================================


use std::sync::Arc;

use pharma_waste_analytics::api::{ApiError, DashboardApi, ALL_DEPARTMENTS_LABEL};
use pharma_waste_analytics::config::{demo_reference_data, AnalyticsConfig};
use pharma_waste_analytics::domain::TimeWindow;
use pharma_waste_analytics::importer::{CsvEventSource, StaticEventSource, SyntheticEventSource};
use test_helpers::{fixed_now, scenario_events, scenario_reference};

async fn scenario_api() -> DashboardApi {
    pharma_waste_analytics::logging::init_test();
    let source = StaticEventSource::new(scenario_events());
    DashboardApi::load(
        Arc::new(scenario_reference()),
        Arc::new(AnalyticsConfig::default()),
        &source,
    )
    .await
    .expect("加载失败")
}

// ==========================================
// 加载
// ==========================================

#[tokio::test]
async fn test_load_from_synthetic_source() {
    let reference = Arc::new(demo_reference_data());
    let config = Arc::new(AnalyticsConfig::default());
    let source = SyntheticEventSource::new(reference.clone(), &config, Some(7)).with_now(fixed_now());

    let api = DashboardApi::load(reference, config, &source).await.unwrap();

    assert_eq!(api.event_count(), 220);
    let snapshot = api.get_dashboard_at("90", "all", fixed_now()).unwrap();
    assert_eq!(snapshot.totals.event_count, 220);
    assert_eq!(snapshot.recommendations.len(), 3);
    assert_eq!(snapshot.recent_events.len(), 12);
}

#[tokio::test]
async fn test_load_from_missing_csv_is_event_source_error() {
    let source = CsvEventSource::new("tests/fixtures/datasets/does_not_exist.csv");

    let result = DashboardApi::load(
        Arc::new(scenario_reference()),
        Arc::new(AnalyticsConfig::default()),
        &source,
    )
    .await;

    match result {
        Err(ApiError::EventSource(msg)) => assert!(msg.contains("does_not_exist.csv")),
        Err(other) => panic!("unexpected error: {:?}", other),
        Ok(_) => panic!("missing file must fail"),
    }
}

// ==========================================
// 查询
// ==========================================

#[tokio::test]
async fn test_get_dashboard_scenario() {
    let api = scenario_api().await;

    let snapshot = api.get_dashboard_at("7", "all", fixed_now()).unwrap();

    assert_eq!(snapshot.window_days, 7);
    assert_eq!(snapshot.totals.event_count, 3);
    assert!((snapshot.totals.total_cost - 25.0).abs() < 1e-9);
    assert_eq!(snapshot.top_drugs[0].key, "X");
}

#[tokio::test]
async fn test_get_dashboard_department_is_case_insensitive_for_all() {
    let api = scenario_api().await;

    let upper = api.get_dashboard_at("30", "ALL", fixed_now()).unwrap();
    let lower = api.get_dashboard_at("30", "all", fixed_now()).unwrap();

    assert_eq!(upper.totals, lower.totals);
}

#[tokio::test]
async fn test_get_dashboard_unknown_department_is_empty() {
    let api = scenario_api().await;

    let snapshot = api.get_dashboard_at("90", "NOPE", fixed_now()).unwrap();

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.totals.total_cost, 0.0);
    assert_eq!(snapshot.totals.avg_cost_per_event, 0.0);
    assert!(snapshot.time_series.is_empty());
    assert!(snapshot.top_drugs.is_empty());
    assert!(snapshot.top_departments.is_empty());
    assert!(snapshot.recommendations.is_empty());
}

#[tokio::test]
async fn test_get_dashboard_rejects_invalid_input() {
    let api = scenario_api().await;

    for (range, department) in [("abc", "all"), ("-7", "all"), ("3651", "all"), ("7", "")] {
        let result = api.get_dashboard_at(range, department, fixed_now());
        assert!(
            matches!(result, Err(ApiError::InvalidInput(_))),
            "range={:?} department={:?}",
            range,
            department
        );
    }
}

#[tokio::test]
async fn test_snapshot_serializes_to_json() {
    let api = scenario_api().await;
    let snapshot = api.get_dashboard_at("30", "A", fixed_now()).unwrap();

    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["window_days"], 30);
    assert_eq!(json["totals"]["event_count"], 2);
    assert_eq!(json["department"]["department"], "A");
    assert_eq!(json["recent_events"][0]["reason"], "Expired");
}

// ==========================================
// 辅助接口
// ==========================================

#[tokio::test]
async fn test_department_options_start_with_all() {
    let api = scenario_api().await;

    let options = api.department_options();

    assert_eq!(options.len(), 3);
    assert_eq!(options[0].value, "all");
    assert_eq!(options[0].label, ALL_DEPARTMENTS_LABEL);
    assert_eq!(options[1].value, "A");
    assert_eq!(options[1].label, "Ward A");
}

#[tokio::test]
async fn test_window_options_are_presets_in_order() {
    let api = scenario_api().await;

    let windows = api.window_options();

    assert_eq!(
        windows,
        vec![TimeWindow::LAST_7_DAYS, TimeWindow::LAST_30_DAYS, TimeWindow::LAST_90_DAYS]
    );
    // 每个预设都能直接作为查询参数
    for window in windows {
        let snapshot = api
            .get_dashboard_at(&window.to_string(), "all", fixed_now())
            .unwrap();
        assert_eq!(snapshot.window_days, window.days());
    }
}

#[tokio::test]
async fn test_default_dashboard_uses_config_window() {
    let config = AnalyticsConfig {
        default_window_days: 7,
        ..AnalyticsConfig::default()
    };
    let api = DashboardApi::load(
        Arc::new(scenario_reference()),
        Arc::new(config),
        &StaticEventSource::new(Vec::new()),
    )
    .await
    .unwrap();

    let snapshot = api.get_default_dashboard();

    assert_eq!(snapshot.window_days, 7);
    assert!(snapshot.is_empty());
    assert_eq!(api.event_count(), 0);
}
