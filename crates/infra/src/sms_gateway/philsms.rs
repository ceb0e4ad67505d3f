//! PhilSMS ゲートウェイ実装
//!
//! `POST /api/v3/sms/send` に JSON で送信する。認証は API キーの Bearer トークン。

use async_trait::async_trait;
use rentrelay_domain::message::{SmsMessage, SmsType};
use serde::Serialize;

use super::{GatewayResult, SmsGateway, SmsGatewayError};

/// PhilSMS の既定ベース URL
pub const DEFAULT_PHILSMS_URL: &str = "https://dashboard.philsms.com";

/// PhilSMS 送信リクエスト
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    recipient: &'a str,
    sender_id: &'a str,
    #[serde(rename = "type")]
    sms_type:  SmsType,
    message:   &'a str,
}

impl<'a> From<&'a SmsMessage> for SendRequest<'a> {
    fn from(message: &'a SmsMessage) -> Self {
        Self {
            recipient: message.recipient.as_str(),
            sender_id: &message.sender_id,
            sms_type:  message.sms_type,
            message:   &message.body,
        }
    }
}

/// PhilSMS ゲートウェイ
pub struct PhilSmsGateway {
    base_url: String,
    api_key:  String,
    client:   reqwest::Client,
}

impl PhilSmsGateway {
    /// 新しい PhilSmsGateway を作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: PhilSMS のベース URL（通常は [`DEFAULT_PHILSMS_URL`]）
    /// - `api_key`: PhilSMS の API キー
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key:  api_key.into(),
            client:   reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SmsGateway for PhilSmsGateway {
    async fn send(&self, message: &SmsMessage) -> Result<GatewayResult, SmsGatewayError> {
        let url = format!("{}/api/v3/sms/send", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&SendRequest::from(message))
            .send()
            .await?;

        read_result(response).await
    }
}

async fn read_result(response: reqwest::Response) -> Result<GatewayResult, SmsGatewayError> {
    let status = response.status().as_u16();
    let raw = response.text().await?;

    if !(200..300).contains(&status) {
        tracing::warn!(
            http.status_code = status,
            provider.body = %raw,
            "PhilSMS が送信を受け付けませんでした"
        );
    }

    Ok(GatewayResult::from_raw(status, raw))
}
