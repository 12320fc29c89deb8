//! Errors - ドメイン値の構築エラー
//!
//! 分類ロジック自体は全域関数なのでエラーを持ちません。
//! ここにあるのは EventRecord を組み立てる段階での検証エラーだけです。
//! repository のエラーは各実装の型のまま呼び出し元へ返されます。

use thiserror::Error;

/// EventRecord の検証エラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EventRecordError {
    #[error("review duration must not be negative (got {0} hours)")]
    NegativeReviewDuration(f64),

    #[error("review duration must be a finite number of hours (got {0})")]
    NonFiniteReviewDuration(f64),
}
