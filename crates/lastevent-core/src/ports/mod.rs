//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部システムへのインターフェースを提供し、実装の詳細を隠蔽します。
//!
//! - LoadLastEventRepository: group の直近イベントの取得
//! - Clock: 現在時刻

pub mod clock;
pub mod event_repository;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_repository::LoadLastEventRepository;
