use super::{AggregationEngine, DEFAULT_TOP_N};
use crate::domain::event::WasteEvent;
use crate::domain::reference::{
    Department, DepartmentWeight, Drug, ReferenceData, ReferenceTables,
};
use crate::domain::types::WasteReason;
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use std::collections::BTreeMap;

// ==========================================
// 测试辅助函数
// ==========================================

/// 两个科室 (A/B)、两种药品 (D1 单价 1, D2 单价 2)
fn create_test_reference() -> ReferenceData {
    let tables = ReferenceTables {
        departments: vec![
            Department {
                id: "A".to_string(),
                name: "Dept A".to_string(),
            },
            Department {
                id: "B".to_string(),
                name: "Dept B".to_string(),
            },
        ],
        drugs: vec![
            Drug {
                id: "D1".to_string(),
                name: "Drug One".to_string(),
                cost_per_ml: 1.0,
            },
            Drug {
                id: "D2".to_string(),
                name: "Drug Two".to_string(),
                cost_per_ml: 2.0,
            },
        ],
        vial_volumes_ml: BTreeMap::new(),
        department_weights: vec![
            DepartmentWeight {
                department_id: "A".to_string(),
                weight: 1.0,
            },
            DepartmentWeight {
                department_id: "B".to_string(),
                weight: 1.0,
            },
        ],
        department_drug_profiles: BTreeMap::new(),
    };
    ReferenceData::new(tables).unwrap()
}

fn at(day: u32, hour: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2026, 4, day, hour, 0, 0)
        .earliest()
        .unwrap()
}

fn create_event(id: &str, dept: &str, drug: &str, volume_ml: f64, when: DateTime<Local>) -> WasteEvent {
    WasteEvent::new(id, when, dept, drug, volume_ml, WasteReason::Expired)
}

/// A/D1 10mL, A/D1 5mL, B/D2 5mL
fn create_scenario_events() -> Vec<WasteEvent> {
    vec![
        create_event("e1", "A", "D1", 10.0, at(10, 9)),
        create_event("e2", "A", "D1", 5.0, at(10, 15)),
        create_event("e3", "B", "D2", 5.0, at(11, 8)),
    ]
}

// ==========================================
// 汇总指标
// ==========================================

#[test]
fn test_totals_for_scenario() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);

    let totals = engine.totals(&create_scenario_events());

    assert!((totals.total_volume_ml - 20.0).abs() < 1e-9);
    assert!((totals.total_cost - 25.0).abs() < 1e-9);
    assert_eq!(totals.event_count, 3);
    assert!((totals.avg_cost_per_event - 25.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_totals_empty_input() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);

    let totals = engine.totals(&[]);

    assert_eq!(totals.event_count, 0);
    assert_eq!(totals.total_cost, 0.0);
    assert_eq!(totals.total_volume_ml, 0.0);
    assert_eq!(totals.avg_cost_per_event, 0.0);
}

#[test]
fn test_unknown_drug_costs_nothing() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);
    let events = vec![create_event("u1", "A", "GHOST", 7.5, at(3, 10))];

    assert_eq!(engine.cost_of(&events[0]), 0.0);

    let totals = engine.totals(&events);
    assert!((totals.total_volume_ml - 7.5).abs() < 1e-9);
    assert_eq!(totals.total_cost, 0.0);
}

// ==========================================
// 日序列
// ==========================================

#[test]
fn test_time_series_groups_by_local_day_ascending() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);

    // 倒序输入,输出应按日期升序
    let mut events = create_scenario_events();
    events.reverse();
    let series = engine.time_series(&events);

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].day, NaiveDate::from_ymd_opt(2026, 4, 10).unwrap());
    assert!((series[0].cost - 15.0).abs() < 1e-9);
    assert!((series[0].volume_ml - 15.0).abs() < 1e-9);
    assert_eq!(series[0].event_count, 2);

    assert_eq!(series[1].day, NaiveDate::from_ymd_opt(2026, 4, 11).unwrap());
    assert!((series[1].cost - 10.0).abs() < 1e-9);
    assert_eq!(series[1].event_count, 1);
}

#[test]
fn test_time_series_sum_matches_totals() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);
    let base = at(1, 12);
    let events: Vec<WasteEvent> = (0..40)
        .map(|i| {
            create_event(
                &format!("s{}", i),
                if i % 2 == 0 { "A" } else { "B" },
                if i % 3 == 0 { "D2" } else { "D1" },
                1.0 + i as f64 * 0.5,
                base + Duration::hours(i * 7),
            )
        })
        .collect();

    let totals = engine.totals(&events);
    let series = engine.time_series(&events);

    let series_cost: f64 = series.iter().map(|p| p.cost).sum();
    let series_volume: f64 = series.iter().map(|p| p.volume_ml).sum();
    let series_count: usize = series.iter().map(|p| p.event_count).sum();
    assert!((series_cost - totals.total_cost).abs() < 1e-6);
    assert!((series_volume - totals.total_volume_ml).abs() < 1e-6);
    assert_eq!(series_count, totals.event_count);
    assert!(series.windows(2).all(|w| w[0].day < w[1].day));
}

#[test]
fn test_time_series_empty_input() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);
    assert!(engine.time_series(&[]).is_empty());
}

// ==========================================
// Top-N 排行
// ==========================================

#[test]
fn test_top_drugs_and_departments_for_scenario() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);
    let events = create_scenario_events();

    let drugs = engine.top_drugs(&events, DEFAULT_TOP_N);
    assert_eq!(drugs.len(), 2);
    assert_eq!(drugs[0].key, "D1");
    assert_eq!(drugs[0].name, "Drug One");
    assert!((drugs[0].cost - 15.0).abs() < 1e-9);
    assert_eq!(drugs[0].event_count, 2);
    assert_eq!(drugs[1].key, "D2");
    assert!((drugs[1].cost - 10.0).abs() < 1e-9);

    let depts = engine.top_departments(&events, DEFAULT_TOP_N);
    assert_eq!(depts.len(), 2);
    assert_eq!(depts[0].name, "Dept A");
    assert!((depts[0].cost - 15.0).abs() < 1e-9);
    assert_eq!(depts[1].name, "Dept B");
    assert!((depts[1].cost - 10.0).abs() < 1e-9);
}

#[test]
fn test_top_n_truncates() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);
    let events = create_scenario_events();

    let top = engine.top_drugs(&events, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].key, "D1");

    assert!(engine.top_drugs(&events, 0).is_empty());
}

#[test]
fn test_top_n_ties_keep_first_seen_order() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);
    // D2 先出现, 两者成本相同 (2×1 = 1×2)
    let events = vec![
        create_event("t1", "B", "D2", 1.0, at(5, 9)),
        create_event("t2", "A", "D1", 2.0, at(5, 10)),
    ];

    let top = engine.top_drugs(&events, DEFAULT_TOP_N);
    let keys: Vec<&str> = top.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["D2", "D1"]);
}

#[test]
fn test_unknown_ids_fall_back_to_raw_id() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);
    let events = vec![create_event("u1", "ZZ", "GHOST", 3.0, at(6, 9))];

    let drugs = engine.top_drugs(&events, DEFAULT_TOP_N);
    assert_eq!(drugs[0].name, "GHOST");
    assert_eq!(drugs[0].cost, 0.0);

    let depts = engine.top_departments(&events, DEFAULT_TOP_N);
    assert_eq!(depts[0].name, "ZZ");
}

#[test]
fn test_top_n_custom_key() {
    let reference = create_test_reference();
    let engine = AggregationEngine::new(&reference);
    let events = create_scenario_events();

    let by_reason = engine.top_n(
        &events,
        |e| e.reason.as_str(),
        |key| key.to_uppercase(),
        DEFAULT_TOP_N,
    );
    assert_eq!(by_reason.len(), 1);
    assert_eq!(by_reason[0].event_count, 3);
    assert!((by_reason[0].cost - 25.0).abs() < 1e-9);
}
