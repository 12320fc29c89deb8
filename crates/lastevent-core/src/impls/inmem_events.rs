//! InMemoryEventRepository - 開発用の repository
//!
//! # 実装詳細
//! - HashMap<GroupId, Vec<EventRecord>> で group ごとにイベントを保持
//! - tokio の RwLock で排他制御（読み取りは並行に実行できる）
//! - 「直近」= end_date が最も遅いもの（同じ end_date なら後から追加した方）

use async_trait::async_trait;
use std::collections::HashMap;
use std::convert::Infallible;
use tokio::sync::RwLock;

use crate::domain::{EventRecord, GroupId, GroupedEventRecord};
use crate::ports::LoadLastEventRepository;

/// InMemoryEventRepository は開発用の repository
///
/// # 使用例
/// ```ignore
/// let repository = InMemoryEventRepository::new();
/// repository.insert(GroupId::from("g1"), event).await;
/// let last = repository.load_last_event(&GroupId::from("g1")).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    events: RwLock<HashMap<GroupId, Vec<EventRecord>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from a flat list of grouped records (file loaders, fixtures).
    pub fn from_records(records: impl IntoIterator<Item = GroupedEventRecord>) -> Self {
        let mut events: HashMap<GroupId, Vec<EventRecord>> = HashMap::new();
        for record in records {
            events.entry(record.group_id).or_default().push(record.event);
        }
        Self {
            events: RwLock::new(events),
        }
    }

    pub async fn insert(&self, group_id: GroupId, event: EventRecord) {
        let mut events = self.events.write().await;
        events.entry(group_id).or_default().push(event);
    }

    /// Number of groups with at least one event.
    pub async fn group_count(&self) -> usize {
        self.events.read().await.len()
    }
}

#[async_trait]
impl LoadLastEventRepository for InMemoryEventRepository {
    type Error = Infallible;

    async fn load_last_event(
        &self,
        group_id: &GroupId,
    ) -> Result<Option<EventRecord>, Self::Error> {
        let events = self.events.read().await;
        // max_by_key は同値なら最後の要素を返す
        let last = events
            .get(group_id)
            .and_then(|list| list.iter().max_by_key(|event| event.end_date()))
            .cloned();
        Ok(last)
    }
}
