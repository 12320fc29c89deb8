//! CheckLastEventStatus - group の直近イベントの状態を判定する use case
//!
//! 流れ: load_last_event(group_id).await → clock.now() → classify
//!
//! - repository 呼び出しは 1 回だけ（リトライ・フォールバックなし）
//! - repository のエラーはそのまま返す
//! - 内部状態を持たないので、複数の group に対して並行に使える

use tracing::{debug, warn};

use crate::domain::{EventStatus, GroupId, classify};
use crate::ports::{Clock, LoadLastEventRepository, SystemClock};

/// group の直近イベントを取得して [`EventStatus`] を返す use case
///
/// # 使用例
/// ```ignore
/// let use_case = CheckLastEventStatus::new(repository);
/// let status = use_case.perform(&GroupId::from("group-1")).await?;
/// ```
pub struct CheckLastEventStatus<R, C = SystemClock> {
    repository: R,
    clock: C,
}

impl<R: LoadLastEventRepository> CheckLastEventStatus<R, SystemClock> {
    pub fn new(repository: R) -> Self {
        Self::with_clock(repository, SystemClock)
    }
}

impl<R, C> CheckLastEventStatus<R, C>
where
    R: LoadLastEventRepository,
    C: Clock,
{
    /// Clock を差し替えて構築（テストでは FixedClock を渡す）
    pub fn with_clock(repository: R, clock: C) -> Self {
        Self { repository, clock }
    }

    /// Load the group's last event and classify it.
    ///
    /// `now` is read after the lookup completes, so the status reflects the
    /// instant classification happens.
    pub async fn perform(&self, group_id: &GroupId) -> Result<EventStatus, R::Error> {
        let event = match self.repository.load_last_event(group_id).await {
            Ok(event) => event,
            Err(err) => {
                warn!(%group_id, error = %err, "failed to load last event");
                return Err(err);
            }
        };

        let now = self.clock.now();
        let status = classify(event.as_ref(), now);
        debug!(
            %group_id,
            has_event = event.is_some(),
            %now,
            %status,
            "classified last event"
        );
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventRecord;
    use crate::ports::FixedClock;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use rstest::rstest;
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    const ONE_HOUR_MS: i64 = 3_600_000;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
    }

    /// 呼び出し内容を記録する spy
    #[derive(Default)]
    struct LoadLastEventRepositorySpy {
        group_ids: Mutex<Vec<GroupId>>,
        calls_count: AtomicUsize,
        output: Option<EventRecord>,
    }

    impl LoadLastEventRepositorySpy {
        fn returning(output: Option<EventRecord>) -> Self {
            Self {
                output,
                ..Self::default()
            }
        }

        fn calls_count(&self) -> usize {
            self.calls_count.load(Ordering::SeqCst)
        }

        fn group_ids(&self) -> Vec<GroupId> {
            self.group_ids.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LoadLastEventRepository for LoadLastEventRepositorySpy {
        type Error = Infallible;

        async fn load_last_event(
            &self,
            group_id: &GroupId,
        ) -> Result<Option<EventRecord>, Self::Error> {
            self.group_ids.lock().unwrap().push(group_id.clone());
            self.calls_count.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.clone())
        }
    }

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("storage unavailable: {0}")]
    struct StorageUnavailable(String);

    #[derive(Default)]
    struct FailingRepository {
        calls_count: AtomicUsize,
    }

    #[async_trait]
    impl LoadLastEventRepository for FailingRepository {
        type Error = StorageUnavailable;

        async fn load_last_event(
            &self,
            group_id: &GroupId,
        ) -> Result<Option<EventRecord>, Self::Error> {
            self.calls_count.fetch_add(1, Ordering::SeqCst);
            Err(StorageUnavailable(group_id.to_string()))
        }
    }

    type Sut = CheckLastEventStatus<Arc<LoadLastEventRepositorySpy>, FixedClock>;

    fn make_sut(output: Option<EventRecord>) -> (Sut, Arc<LoadLastEventRepositorySpy>) {
        let repository = Arc::new(LoadLastEventRepositorySpy::returning(output));
        let sut = CheckLastEventStatus::with_clock(repository.clone(), FixedClock::new(now()));
        (sut, repository)
    }

    #[tokio::test]
    async fn loads_last_event_once_with_given_group_id() {
        let (sut, repository) = make_sut(None);

        sut.perform(&GroupId::from("any_group_id")).await.unwrap();

        assert_eq!(repository.group_ids(), vec![GroupId::from("any_group_id")]);
        assert_eq!(repository.calls_count(), 1);
    }

    #[tokio::test]
    async fn returns_done_when_group_has_no_event() {
        let (sut, _repository) = make_sut(None);

        let status = sut.perform(&GroupId::from("any_group_id")).await.unwrap();

        assert_eq!(status, EventStatus::Done);
    }

    #[rstest]
    #[case::review_time_elapsed(-1 - ONE_HOUR_MS, EventStatus::Done)]
    #[case::review_time_ends_now(-ONE_HOUR_MS, EventStatus::InReview)]
    #[case::review_time_not_elapsed(1 - ONE_HOUR_MS, EventStatus::InReview)]
    #[case::event_ends_now(0, EventStatus::Active)]
    #[case::event_not_ended(1, EventStatus::Active)]
    #[tokio::test]
    async fn classifies_loaded_event_at_clock_time(
        #[case] end_offset_ms: i64,
        #[case] expected: EventStatus,
    ) {
        let event =
            EventRecord::new(now() + TimeDelta::milliseconds(end_offset_ms), 1.0).unwrap();
        let (sut, _repository) = make_sut(Some(event));

        let status = sut.perform(&GroupId::from("any_group_id")).await.unwrap();

        assert_eq!(status, expected);
    }

    #[tokio::test]
    async fn sub_millisecond_clock_time_is_not_rounded() {
        // review window 400 µs, now = end + 200 µs → まだ inReview
        let end_date = now() - TimeDelta::microseconds(200);
        let event = EventRecord::new(end_date, 400.0 / 3_600_000_000.0).unwrap();
        let (sut, _repository) = make_sut(Some(event));

        let status = sut.perform(&GroupId::from("any_group_id")).await.unwrap();

        assert_eq!(status, EventStatus::InReview);
    }

    #[tokio::test]
    async fn propagates_repository_error_unchanged() {
        let repository = Arc::new(FailingRepository::default());
        let sut = CheckLastEventStatus::with_clock(repository.clone(), FixedClock::new(now()));

        let err = sut.perform(&GroupId::from("broken")).await.unwrap_err();

        assert_eq!(err, StorageUnavailable("broken".to_string()));
        // リトライしない
        assert_eq!(repository.calls_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_calls_are_independent() {
        let event = EventRecord::new(now() + TimeDelta::hours(1), 0.0).unwrap();
        let (sut, repository) = make_sut(Some(event));
        let sut = Arc::new(sut);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sut = sut.clone();
                tokio::spawn(async move { sut.perform(&GroupId::new(format!("g{i}"))).await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), EventStatus::Active);
        }
        assert_eq!(repository.calls_count(), 8);
        let mut ids = repository.group_ids();
        ids.sort();
        let mut expected: Vec<_> = (0..8).map(|i| GroupId::new(format!("g{i}"))).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn shared_repository_through_arc() {
        let repository = Arc::new(LoadLastEventRepositorySpy::returning(None));
        let first = CheckLastEventStatus::with_clock(repository.clone(), FixedClock::new(now()));
        let second = CheckLastEventStatus::with_clock(repository.clone(), FixedClock::new(now()));

        first.perform(&GroupId::from("a")).await.unwrap();
        second.perform(&GroupId::from("b")).await.unwrap();

        assert_eq!(repository.calls_count(), 2);
    }

    #[tokio::test]
    async fn default_constructor_uses_system_clock() {
        // end_date が十分未来なら SystemClock でも active
        let event = EventRecord::new(Utc::now() + TimeDelta::days(1), 1.0).unwrap();
        let sut = CheckLastEventStatus::new(LoadLastEventRepositorySpy::returning(Some(event)));

        let status = sut.perform(&GroupId::from("any_group_id")).await.unwrap();

        assert_eq!(status, EventStatus::Active);
    }
}
