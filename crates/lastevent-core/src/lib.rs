//! lastevent-core
//!
//! Classifies the most recent event of a group as `active`, `inReview` or
//! `done`, relative to the current instant.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（GroupId, EventRecord, EventStatus, classify）
//! - **ports**: 抽象化レイヤー（LoadLastEventRepository, Clock）
//! - **app**: use case（CheckLastEventStatus）
//! - **impls**: 実装（InMemoryEventRepository など開発用）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

pub use self::app::CheckLastEventStatus;
pub use self::domain::{EventRecord, EventRecordError, EventStatus, GroupId, classify};
pub use self::ports::{Clock, FixedClock, LoadLastEventRepository, SystemClock};
