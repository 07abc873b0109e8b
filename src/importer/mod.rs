// ==========================================
// 药品废弃分析系统 - 事件来源层
// ==========================================
// 职责: 外部事件获取（合成、CSV、内存）
// ==========================================

pub mod csv_source;
pub mod error;
pub mod event_source;

// 重导出核心类型
pub use csv_source::{
    parse_timestamp, write_events_csv, CsvEventSource, CsvImportReport, RowRejection, CSV_HEADER,
};
pub use error::{SourceError, SourceResult};
pub use event_source::{EventSource, StaticEventSource, SyntheticEventSource};
