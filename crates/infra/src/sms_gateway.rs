//! # SMS ゲートウェイ
//!
//! 組み立て済みの SMS を外部ゲートウェイに送信する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `SmsGateway` trait で送信方法を抽象化
//! - **2 つの実装**: PhilSMS（本番用）、Noop（ローカル開発用）
//! - **結果はそのまま返す**: ゲートウェイ固有のエラーコードは解釈せず、
//!   HTTP ステータスとレスポンスボディを呼び出し側に渡す
//!
//! ゲートウェイが受け付けても最終的な配信を保証するものではない。
//! この境界は隠さず、レスポンスボディをそのまま呼び出し元へ返すことで扱う。

mod noop;
mod philsms;

use async_trait::async_trait;
pub use noop::NoopSmsGateway;
pub use philsms::{DEFAULT_PHILSMS_URL, PhilSmsGateway};
use rentrelay_domain::message::SmsMessage;
use serde_json::Value;
use thiserror::Error;

/// ゲートウェイ呼び出しの結果
///
/// HTTP レベルで応答が得られた場合の結果。成功・失敗の両方を含む。
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResult {
    /// HTTP ステータスが 2xx か
    pub success:           bool,
    /// HTTP ステータスコード
    pub http_status:       u16,
    /// レスポンスボディ（JSON としてパースできなければ文字列）
    pub provider_response: Value,
}

impl GatewayResult {
    /// ステータスと生のボディから結果を作る
    pub fn from_raw(http_status: u16, raw: String) -> Self {
        let provider_response = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
        Self {
            success: (200..300).contains(&http_status),
            http_status,
            provider_response,
        }
    }
}

/// SMS ゲートウェイのエラー
///
/// HTTP 応答が得られなかった場合のみ。非 2xx は [`GatewayResult`] で表す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmsGatewayError {
    /// 接続失敗・タイムアウト・ボディ読み取り失敗
    #[error("SMS ゲートウェイとの通信に失敗: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for SmsGatewayError {
    fn from(err: reqwest::Error) -> Self {
        SmsGatewayError::Transport(err.to_string())
    }
}

/// SMS 送信トレイト
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// SMS を 1 回だけ送信する（リトライしない）
    async fn send(&self, message: &SmsMessage) -> Result<GatewayResult, SmsGatewayError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_raw_jsonボディはパースされる() {
        let result = GatewayResult::from_raw(200, r#"{"status":"success"}"#.to_string());

        assert_eq!(
            result,
            GatewayResult {
                success:           true,
                http_status:       200,
                provider_response: json!({"status": "success"}),
            }
        );
    }

    #[test]
    fn test_from_raw_jsonでないボディは文字列のまま() {
        let result = GatewayResult::from_raw(502, "Bad Gateway".to_string());

        assert!(!result.success);
        assert_eq!(result.provider_response, json!("Bad Gateway"));
    }

    #[test]
    fn test_from_raw_空ボディは空文字() {
        let result = GatewayResult::from_raw(204, String::new());

        assert!(result.success);
        assert_eq!(result.provider_response, json!(""));
    }

    #[test]
    fn test_from_raw_2xx以外は失敗() {
        assert!(!GatewayResult::from_raw(199, "{}".to_string()).success);
        assert!(GatewayResult::from_raw(299, "{}".to_string()).success);
        assert!(!GatewayResult::from_raw(300, "{}".to_string()).success);
        assert!(!GatewayResult::from_raw(422, "{}".to_string()).success);
    }
}
