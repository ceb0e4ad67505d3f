//! Noop SMS ゲートウェイ実装
//!
//! SMS を実際に送信せず、ログ出力のみ行う。
//! ローカル開発や送信無効化時に使用する。

use async_trait::async_trait;
use rentrelay_domain::message::SmsMessage;
use serde_json::json;

use super::{GatewayResult, SmsGateway, SmsGatewayError};

/// Noop SMS ゲートウェイ（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopSmsGateway;

#[async_trait]
impl SmsGateway for NoopSmsGateway {
    async fn send(&self, message: &SmsMessage) -> Result<GatewayResult, SmsGatewayError> {
        tracing::info!(
            recipient = %message.recipient,
            sender_id = %message.sender_id,
            "Noop: SMS 送信をスキップ"
        );
        Ok(GatewayResult {
            success:           true,
            http_status:       200,
            provider_response: json!({"status": "skipped", "backend": "noop"}),
        })
    }
}

#[cfg(test)]
mod tests {
    use rentrelay_domain::{message::SmsType, phone::PhMobileNumber};

    use super::*;

    #[tokio::test]
    async fn sendが成功結果を返す() {
        let gateway = NoopSmsGateway;
        let message = SmsMessage {
            recipient: PhMobileNumber::parse("09171234567").unwrap(),
            sender_id: "PhilSMS".to_string(),
            sms_type:  SmsType::Plain,
            body:      "テスト".to_string(),
        };

        let result = gateway.send(&message).await.unwrap();

        assert!(result.success);
        assert_eq!(result.http_status, 200);
    }
}
