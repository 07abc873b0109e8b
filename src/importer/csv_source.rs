// ==========================================
// 药品废弃分析系统 - CSV 事件来源
// ==========================================
// 支持: CSV (.csv), 表头 id,occurred_at,department_id,drug_id,volume_ml,reason
// 流程: 文件校验 → 逐行映射 → 行级校验（非法行跳过并计数）
// ==========================================

use crate::domain::event::{sort_newest_first, WasteEvent};
use crate::domain::types::WasteReason;
use crate::importer::error::{SourceError, SourceResult};
use crate::importer::event_source::EventSource;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// CSV 表头（固定列顺序）
pub const CSV_HEADER: [&str; 6] = [
    "id",
    "occurred_at",
    "department_id",
    "drug_id",
    "volume_ml",
    "reason",
];

/// 必需列（id 可缺省）
const REQUIRED_COLUMNS: [&str; 5] = [
    "occurred_at",
    "department_id",
    "drug_id",
    "volume_ml",
    "reason",
];

/// 无时区时间格式（按本地时区解释）
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

// ==========================================
// RowRejection - 被跳过的行
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RowRejection {
    pub row: usize, // 数据行号（表头之后从 1 开始）
    pub field: &'static str,
    pub message: String,
}

// ==========================================
// CsvImportReport - 导入结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CsvImportReport {
    pub events: Vec<WasteEvent>,
    pub rejected: Vec<RowRejection>,
    pub total_rows: usize,
}

impl CsvImportReport {
    pub fn accepted(&self) -> usize {
        self.events.len()
    }
}

// ==========================================
// CsvEventSource - CSV 事件来源
// ==========================================
#[derive(Debug, Clone)]
pub struct CsvEventSource {
    path: PathBuf,
    strict: bool,
}

impl CsvEventSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            strict: false,
        }
    }

    /// 严格模式: 遇到首个非法行即返回错误
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 同步解析文件
    pub fn parse(&self) -> SourceResult<CsvImportReport> {
        parse_csv_file(&self.path, self.strict)
    }
}

#[async_trait]
impl EventSource for CsvEventSource {
    async fn fetch_events(&self) -> SourceResult<Vec<WasteEvent>> {
        let path = self.path.clone();
        let strict = self.strict;
        let report = tokio::task::spawn_blocking(move || parse_csv_file(&path, strict))
            .await
            .map_err(|e| SourceError::FetchFailed {
                source_name: self.name().to_string(),
                message: e.to_string(),
            })??;

        info!(
            path = %self.path.display(),
            total_rows = report.total_rows,
            accepted = report.accepted(),
            rejected = report.rejected.len(),
            "CSV 事件导入完成"
        );
        Ok(report.events)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

// ==========================================
// 文件解析
// ==========================================

fn parse_csv_file(path: &Path, strict: bool) -> SourceResult<CsvImportReport> {
    // 检查文件存在
    if !path.exists() {
        return Err(SourceError::FileNotFound(path.display().to_string()));
    }

    // 检查扩展名
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != "csv" {
        return Err(SourceError::UnsupportedFormat(ext));
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SourceError::MissingColumn(column.to_string()));
        }
    }

    let mut report = CsvImportReport::default();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_number = idx + 1;

        let mut row: HashMap<&str, &str> = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row.insert(header.as_str(), value.trim());
            }
        }

        // 跳过完全空白的行
        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        report.total_rows += 1;

        match map_row(&row) {
            Ok(event) => report.events.push(event),
            Err(rejection) => {
                if strict {
                    return Err(SourceError::RowError {
                        row: row_number,
                        field: rejection.field.to_string(),
                        message: rejection.message,
                    });
                }
                warn!(
                    row = row_number,
                    field = rejection.field,
                    message = %rejection.message,
                    "跳过非法行"
                );
                report.rejected.push(RowRejection {
                    row: row_number,
                    ..rejection
                });
            }
        }
    }

    sort_newest_first(&mut report.events);
    Ok(report)
}

// ==========================================
// 行映射
// ==========================================

fn map_row(row: &HashMap<&str, &str>) -> Result<WasteEvent, RowRejection> {
    let get = |field: &str| row.get(field).copied().unwrap_or("");

    let id = match get("id") {
        "" => Uuid::new_v4().to_string(),
        id => id.to_string(),
    };

    let occurred_at = parse_timestamp(get("occurred_at"))
        .ok_or_else(|| reject("occurred_at", format!("无法解析时间: {:?}", get("occurred_at"))))?;

    let department_id = required_text(get("department_id"), "department_id")?;
    let drug_id = required_text(get("drug_id"), "drug_id")?;

    let raw_volume = get("volume_ml");
    let volume_ml: f64 = raw_volume
        .parse()
        .map_err(|_| reject("volume_ml", format!("不是数字: {:?}", raw_volume)))?;
    if !volume_ml.is_finite() || volume_ml <= 0.0 {
        return Err(reject("volume_ml", format!("废弃量必须为正数: {}", volume_ml)));
    }

    let reason: WasteReason = get("reason").parse().map_err(|e| reject("reason", e))?;

    Ok(WasteEvent::new(
        id,
        occurred_at,
        department_id,
        drug_id,
        volume_ml,
        reason,
    ))
}

fn required_text(value: &str, field: &'static str) -> Result<String, RowRejection> {
    if value.is_empty() {
        Err(reject(field, "不能为空".to_string()))
    } else {
        Ok(value.to_string())
    }
}

fn reject(field: &'static str, message: String) -> RowRejection {
    RowRejection {
        row: 0,
        field,
        message,
    }
}

/// 解析时间: RFC 3339 优先,其次按本地时区解释无时区时间
pub fn parse_timestamp(value: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Local));
    }
    NAIVE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(value, fmt)
            .ok()
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
    })
}

// ==========================================
// 写出
// ==========================================

/// 按固定表头写出事件（时间为 RFC 3339）
pub fn write_events_csv(path: impl AsRef<Path>, events: &[WasteEvent]) -> SourceResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(CSV_HEADER)?;
    for e in events {
        writer.write_record([
            e.id.as_str(),
            e.occurred_at.to_rfc3339().as_str(),
            e.department_id.as_str(),
            e.drug_id.as_str(),
            e.volume_ml.to_string().as_str(),
            e.reason.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_parse_valid_rows() {
        let file = csv_file(&[
            "id,occurred_at,department_id,drug_id,volume_ml,reason",
            "e1,2026-03-01T08:15:00+00:00,ONC,PEMBRO,2.5,Expired",
            "e2,2026-03-02 09:00:00,ICU,NORAD,1.0,spillage",
        ]);

        let report = CsvEventSource::new(file.path()).parse().unwrap();

        assert_eq!(report.total_rows, 2);
        assert_eq!(report.accepted(), 2);
        assert!(report.rejected.is_empty());
        // 按时间降序
        assert_eq!(report.events[0].id, "e2");
        assert_eq!(report.events[0].reason, WasteReason::Spillage);
    }

    #[test]
    fn test_blank_id_gets_uuid() {
        let file = csv_file(&[
            "id,occurred_at,department_id,drug_id,volume_ml,reason",
            ",2026-03-01T08:15:00Z,ONC,PEMBRO,2.5,Other",
        ]);

        let report = CsvEventSource::new(file.path()).parse().unwrap();
        assert!(Uuid::parse_str(&report.events[0].id).is_ok());
    }

    #[test]
    fn test_invalid_rows_are_skipped_and_counted() {
        let file = csv_file(&[
            "id,occurred_at,department_id,drug_id,volume_ml,reason",
            "ok,2026-03-01T08:15:00Z,ONC,PEMBRO,2.5,Expired",
            "neg,2026-03-01T08:15:00Z,ONC,PEMBRO,-1,Expired",
            "nan,2026-03-01T08:15:00Z,ONC,PEMBRO,abc,Expired",
            "why,2026-03-01T08:15:00Z,ONC,PEMBRO,1.0,Broken",
            "when,yesterday,ONC,PEMBRO,1.0,Expired",
            "nodept,2026-03-01T08:15:00Z,,PEMBRO,1.0,Expired",
            ",,,,,",
        ]);

        let report = CsvEventSource::new(file.path()).parse().unwrap();

        assert_eq!(report.total_rows, 6);
        assert_eq!(report.accepted(), 1);
        let fields: Vec<&str> = report.rejected.iter().map(|r| r.field).collect();
        assert_eq!(
            fields,
            vec!["volume_ml", "volume_ml", "reason", "occurred_at", "department_id"]
        );
        assert_eq!(report.rejected[0].row, 2);
    }

    #[test]
    fn test_strict_mode_fails_on_first_bad_row() {
        let file = csv_file(&[
            "id,occurred_at,department_id,drug_id,volume_ml,reason",
            "bad,2026-03-01T08:15:00Z,ONC,PEMBRO,0,Expired",
        ]);

        let result = CsvEventSource::new(file.path()).strict(true).parse();
        assert!(matches!(
            result,
            Err(SourceError::RowError { row: 1, ref field, .. }) if field == "volume_ml"
        ));
    }

    #[test]
    fn test_file_level_errors() {
        let missing = CsvEventSource::new("does/not/exist.csv").parse();
        assert!(matches!(missing, Err(SourceError::FileNotFound(_))));

        let txt = Builder::new().suffix(".txt").tempfile().unwrap();
        let wrong_ext = CsvEventSource::new(txt.path()).parse();
        assert!(matches!(wrong_ext, Err(SourceError::UnsupportedFormat(_))));

        let no_reason = csv_file(&["id,occurred_at,department_id,drug_id,volume_ml"]);
        let missing_col = CsvEventSource::new(no_reason.path()).parse();
        assert!(matches!(missing_col, Err(SourceError::MissingColumn(ref c)) if c == "reason"));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2026-03-01T08:15:00+02:00").is_some());
        assert!(parse_timestamp("2026-03-01 08:15:00").is_some());
        assert!(parse_timestamp("2026-03-01T08:15:00").is_some());
        assert!(parse_timestamp("03/01/2026").is_none());
    }

    #[tokio::test]
    async fn test_written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.csv");
        let at = parse_timestamp("2026-03-01T08:15:00Z").unwrap();
        let events = vec![WasteEvent::new("w1", at, "ONC", "PEMBRO", 3.5, WasteReason::StockRotation)];

        write_events_csv(&path, &events).unwrap();
        let loaded = CsvEventSource::new(&path).fetch_events().await.unwrap();

        assert_eq!(loaded, events);
    }
}
