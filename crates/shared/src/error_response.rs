//! # エラーレスポンス
//!
//! SMS 中継関数のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は各サービスの責務（shared に axum 依存を入れない）
//! - 呼び出し元（家主向けアプリ）は `error` フィールドだけを表示するため、形は `{ "error": "..." }` に固定

use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub error: String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   pub fn new(error: impl Into<String>) -> Self {
      Self {
         error: error.into(),
      }
   }
}
