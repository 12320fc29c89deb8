//! Impls - 実装（開発用・テスト用）
//!
//! このモジュールには ports の実装を含めます。
//!
//! # 含まれる実装
//! - **InMemoryEventRepository**: 開発用の repository（CLI もこれを使う）
//!
//! 本番用の repository（DB など）はこの crate の外で実装します。

pub mod inmem_events;

// 主要な型を再エクスポート
pub use self::inmem_events::InMemoryEventRepository;
