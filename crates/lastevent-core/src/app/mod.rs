//! App - アプリケーション層
//!
//! このモジュールは、ports と domain を組み合わせて use case を実装します。
//!
//! # 主要コンポーネント
//! - **CheckLastEventStatus**: 直近イベントの取得 → 状態判定

pub mod check_last_event_status;

// 主要な型を再エクスポート
pub use self::check_last_event_status::CheckLastEventStatus;
