// ==========================================
// 药品废弃分析系统 - 引擎层
// ==========================================
// 职责: 实现抽样、生成、过滤、聚合、建议等业务规则
// 红线: 引擎不做 I/O; 随机源与当前时间由调用方注入
// ==========================================

pub mod aggregation;
pub mod error;
pub mod event_store;
pub mod filter;
pub mod orchestrator;
pub mod recommendation;
pub mod sampler;
pub mod synthesizer;

// 重导出核心引擎
pub use aggregation::{AggregationEngine, DEFAULT_TOP_N};
pub use error::{EngineError, EngineResult};
pub use event_store::EventStore;
pub use filter::FilterEngine;
pub use orchestrator::{AnalyticsOrchestrator, AnalyticsQuery};
pub use recommendation::{most_common_reason, RecommendationEngine};
pub use sampler::WeightedSampler;
pub use synthesizer::{EventSynthesizer, SynthesisParams, MIN_EVENT_VOLUME_ML};
