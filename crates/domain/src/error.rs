//! # ドメイン層エラー定義
//!
//! リクエスト内容の検証失敗を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `MissingField` | 400 Bad Request | 必須フィールドが未指定または空白のみ |
//! | `InvalidPhoneNumber` | 400 Bad Request | 送信先番号が正規化できない |
//!
//! ## 使用例
//!
//! ```rust
//! use rentrelay_domain::DomainError;
//!
//! let error = DomainError::MissingField("message");
//! assert_eq!(error.to_string(), "Missing message");
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// `Display` の文字列はそのまま API レスポンスの `error` フィールドに使われる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 必須フィールドが未指定、または trim 後に空
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// フィリピン携帯電話番号として正規化できない
    ///
    /// `original` は入力値そのもの、`transformed` は正規化を試みた結果。
    #[error("Invalid PH mobile number: \"{original}\" -> \"{transformed}\"")]
    InvalidPhoneNumber {
        original:    String,
        transformed: String,
    },
}

/// 必須テキストを検証する
///
/// `None` または trim 後に空の場合は [`DomainError::MissingField`] を返す。
/// 成功時は trim 済みの値を返す。
pub fn require_text<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, DomainError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DomainError::MissingField(field)),
    }
}
