// ==========================================
// 药品废弃分析系统 - 事件存放区
// ==========================================
// 职责: 持有生成/导入的事件,按时间降序排列,对下游只读
// 红线: 创建后不可变
// ==========================================

use crate::domain::event::{sort_newest_first, WasteEvent};
use std::sync::Arc;

// ==========================================
// EventStore - 事件存放区
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Arc<Vec<WasteEvent>>,
}

impl EventStore {
    /// 从事件列表创建（内部按发生时间降序排序）
    pub fn from_events(mut events: Vec<WasteEvent>) -> Self {
        sort_newest_first(&mut events);
        Self {
            events: Arc::new(events),
        }
    }

    pub fn events(&self) -> &[WasteEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// 最近的 `limit` 条事件
    pub fn recent(&self, limit: usize) -> &[WasteEvent] {
        &self.events[..limit.min(self.events.len())]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WasteEvent> {
        self.events.iter()
    }
}

impl From<Vec<WasteEvent>> for EventStore {
    fn from(events: Vec<WasteEvent>) -> Self {
        Self::from_events(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::WasteReason;
    use chrono::{Local, TimeZone};

    fn event(id: &str, day: u32) -> WasteEvent {
        WasteEvent::new(
            id,
            Local.with_ymd_and_hms(2026, 2, day, 9, 0, 0).earliest().unwrap(),
            "A",
            "X",
            1.0,
            WasteReason::Other,
        )
    }

    #[test]
    fn test_store_sorts_newest_first() {
        let store = EventStore::from_events(vec![event("e1", 1), event("e3", 3), event("e2", 2)]);
        let ids: Vec<&str> = store.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e3", "e2", "e1"]);
    }

    #[test]
    fn test_recent_is_clamped() {
        let store = EventStore::from_events(vec![event("e1", 1), event("e2", 2)]);
        assert_eq!(store.recent(1).len(), 1);
        assert_eq!(store.recent(1)[0].id, "e2");
        assert_eq!(store.recent(10).len(), 2);
        assert!(EventStore::default().recent(5).is_empty());
    }

    #[test]
    fn test_clones_share_events() {
        let store = EventStore::from_events(vec![event("e1", 1)]);
        let clone = store.clone();
        assert_eq!(clone.len(), 1);
        assert!(std::ptr::eq(store.events(), clone.events()));
    }
}
