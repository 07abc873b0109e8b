// ==========================================
// 演示事件数据集生成器
// ==========================================
// 用途: 生成演示废弃事件 CSV 及含非法行的混合数据集
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Duration, Local};
use clap::Parser;
use csv::Writer;

use pharma_waste_analytics::config::{demo_reference_data, AnalyticsConfig};
use pharma_waste_analytics::importer::{write_events_csv, EventSource, SyntheticEventSource, CSV_HEADER};

#[derive(Parser, Debug)]
#[command(name = "generate_demo_events", about = "生成演示废弃事件 CSV")]
struct Args {
    /// 输出路径
    #[arg(long, default_value = "tests/fixtures/datasets/demo_events.csv")]
    output: PathBuf,

    /// 事件条数
    #[arg(long, default_value_t = 220)]
    count: usize,

    /// 回溯天数
    #[arg(long, default_value_t = 90)]
    days_back: u32,

    /// 随机种子
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// 同时生成混合问题数据集 (mixed_issues.csv, 与输出同目录)
    #[arg(long)]
    with_mixed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    println!("开始生成演示数据集...");

    let config = AnalyticsConfig::default();
    let source = SyntheticEventSource::new(Arc::new(demo_reference_data()), &config, Some(args.seed))
        .with_count(args.count)
        .with_days_back(args.days_back);

    let events = source.fetch_events().await?;
    write_events_csv(&args.output, &events)?;
    println!("✓ 生成 {} ({}条)", args.output.display(), events.len());

    if args.with_mixed {
        let dir = args.output.parent().unwrap_or_else(|| Path::new("."));
        generate_mixed_issues(&dir.join("mixed_issues.csv"))?;
    }

    println!("✓ 所有数据集生成完成！");
    Ok(())
}

/// 混合问题数据: 合法行与各类非法行交错
fn generate_mixed_issues(path: &Path) -> Result<(), Box<dyn Error>> {
    let now = Local::now();
    let ts = |days: i64| (now - Duration::days(days)).to_rfc3339();

    let rows: Vec<[String; 6]> = vec![
        row("m1", &ts(1), "H1_ICU", "D001", "2.5", "Expired"),
        row("m2", &ts(2), "H1_ICU", "D005", "-3", "Spillage"),         // 负数
        row("m3", &ts(3), "H1_ICU", "D005", "abc", "Spillage"),        // 非数字
        row("m4", &ts(4), "H2_IM", "D024", "1.5", "Broken"),           // 未知原因
        row("m5", "not-a-date", "H2_IM", "D024", "1.5", "Other"),      // 时间错误
        row("m6", &ts(5), "", "D024", "1.5", "Other"),                 // 缺科室
        row("", &ts(6), "H1_ED", "GHOST", "4.0", "Overprepared"),      // 缺ID + 未知药品
        row("m8", &ts(7), "H2_ED", "D012", "0.8", "OpenedNotUsed"),
    ];

    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(CSV_HEADER)?;
    for r in &rows {
        wtr.write_record(r)?;
    }
    wtr.flush()?;

    println!("✓ 生成 {} ({}条, 含5条非法行)", path.display(), rows.len());
    Ok(())
}

fn row(id: &str, at: &str, dept: &str, drug: &str, volume: &str, reason: &str) -> [String; 6] {
    [id, at, dept, drug, volume, reason].map(str::to_string)
}
