// ==========================================
// 药品废弃分析系统 - 命令行主入口
// ==========================================
// 流程: 加载配置 → 加载参考数据 → 获取事件 → 生成看板快照 → 输出
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use pharma_waste_analytics::config::{load_reference_or_demo, AnalyticsConfig};
use pharma_waste_analytics::importer::{CsvEventSource, EventSource, SyntheticEventSource};
use pharma_waste_analytics::logging::{self, LogFormat};
use pharma_waste_analytics::{DashboardApi, DashboardSnapshot, APP_NAME, VERSION};

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "pharma-waste-analytics", version, about = "药品废弃成本/用量分析看板")]
struct Cli {
    /// 时间窗口天数（7 / 30 / 90,0 表示仅今天）; 缺省取配置
    #[arg(long)]
    range: Option<String>,

    /// 科室ID,或 all
    #[arg(long, default_value = "all")]
    department: String,

    /// 演示事件条数（缺省取配置）
    #[arg(long)]
    count: Option<usize>,

    /// 演示事件回溯天数（缺省取配置）
    #[arg(long)]
    days_back: Option<u32>,

    /// 随机种子（固定后结果可复现）
    #[arg(long, env = "PHARMA_WASTE_SEED")]
    seed: Option<u64>,

    /// 事件 CSV 文件（指定后不再生成演示事件）
    #[arg(long)]
    events: Option<PathBuf>,

    /// 参考数据 JSON 文件（缺省使用内置演示数据）
    #[arg(long)]
    reference: Option<PathBuf>,

    /// 分析配置 JSON 文件
    #[arg(long, env = "PHARMA_WASTE_CONFIG")]
    config: Option<PathBuf>,

    /// 输出格式
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    format: OutputFormat,

    /// 以 JSON 格式输出日志
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_with_format(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });
    tracing::info!("{} v{}", APP_NAME, VERSION);

    // 配置
    let config = match &cli.config {
        Some(path) => AnalyticsConfig::load_from_path(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => AnalyticsConfig::from_env().context("读取环境变量配置失败")?,
    };
    let config = Arc::new(config);

    // 参考数据
    let reference = Arc::new(
        load_reference_or_demo(cli.reference.as_deref()).context("加载参考数据失败")?,
    );

    // 事件来源
    let source: Box<dyn EventSource> = match &cli.events {
        Some(path) => Box::new(CsvEventSource::new(path)),
        None => {
            let mut synthetic = SyntheticEventSource::new(reference.clone(), &config, cli.seed);
            if let Some(count) = cli.count {
                synthetic = synthetic.with_count(count);
            }
            if let Some(days_back) = cli.days_back {
                synthetic = synthetic.with_days_back(days_back);
            }
            Box::new(synthetic)
        }
    };

    let api = DashboardApi::load(reference, config.clone(), source.as_ref()).await?;

    let range = cli
        .range
        .clone()
        .unwrap_or_else(|| config.default_window_days.to_string());
    let snapshot = api.get_dashboard(&range, &cli.department)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => print!("{}", render_text(&snapshot, &api)),
    }

    Ok(())
}

/// 文本看板
fn render_text(snapshot: &DashboardSnapshot, api: &DashboardApi) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let department_label = api
        .department_options()
        .into_iter()
        .find(|o| o.value == snapshot.department.as_str())
        .map(|o| o.label)
        .unwrap_or_else(|| snapshot.department.to_string());

    let window_label = pharma_waste_analytics::TimeWindow::from_days(snapshot.window_days)
        .map(|w| w.label())
        .unwrap_or_default();

    let _ = writeln!(out, "== {} ==", APP_NAME);
    let _ = writeln!(out, "窗口: {}  科室: {}", window_label, department_label);
    let _ = writeln!(out);

    let t = &snapshot.totals;
    let _ = writeln!(out, "废弃成本合计 : {:.2}", t.total_cost);
    let _ = writeln!(out, "废弃量合计   : {:.1} mL", t.total_volume_ml);
    let _ = writeln!(out, "事件数       : {}", t.event_count);
    let _ = writeln!(out, "单次平均成本 : {:.2}", t.avg_cost_per_event);

    if snapshot.is_empty() {
        let _ = writeln!(out, "\n当前条件下无废弃事件");
        return out;
    }

    let _ = writeln!(out, "\n-- 药品排行 --");
    for (i, c) in snapshot.top_drugs.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<32} {:>10.2}  {:>8.1} mL",
            i + 1,
            c.name,
            c.cost,
            c.volume_ml
        );
    }

    let _ = writeln!(out, "\n-- 科室排行 --");
    for (i, c) in snapshot.top_departments.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {:<32} {:>10.2}", i + 1, c.name, c.cost);
    }

    let _ = writeln!(out, "\n-- 每日成本 --");
    for p in &snapshot.time_series {
        let _ = writeln!(out, "{}  {:>10.2}  ({} 次)", p.day, p.cost, p.event_count);
    }

    let _ = writeln!(out, "\n-- 建议 --");
    for r in &snapshot.recommendations {
        let _ = writeln!(out, "* {}", r);
    }

    let _ = writeln!(out, "\n-- 最近事件 --");
    for e in &snapshot.recent_events {
        let _ = writeln!(
            out,
            "{}  {:<24} {:<32} {:>6.1} mL  {:<14} {:>8.2}",
            e.occurred_at.format("%Y-%m-%d %H:%M"),
            e.department_name,
            e.drug_name,
            e.volume_ml,
            e.reason.as_str(),
            e.estimated_cost
        );
    }

    out
}
