//! # SMS 中継ユースケース
//!
//! 家主への SMS を 1 通組み立てて送信する。
//!
//! ## 処理の流れ
//!
//! ```text
//! 必須フィールド検証 → 送信先の正規化（厳格）
//!   → 識別情報の取得（3 検索元を並行、失敗は吸収）
//!   → 表示情報の解決 → 本文組み立て → ゲートウェイ送信（1 回のみ）
//! ```
//!
//! 識別情報の取得失敗は送信を止めない。`warn` ログを残して「見つからなかった」として扱う。

use std::sync::Arc;

use rentrelay_domain::{
    error::require_text,
    message::{DEFAULT_SENDER_ID, SmsMessage, SmsType, compose},
    phone::PhMobileNumber,
    tenant_identity::{IdentityOverrides, TenantRecord, TenantSource},
};
use rentrelay_infra::{GatewayResult, IdentityStore, SmsGateway};
use rentrelay_shared::{
    event_log::{error as log_error, event},
    log_business_event,
};
use serde_json::Value;

use crate::error::{GatewayFailure, SendSmsError};

/// SMS 送信の入力
///
/// 値の検証はユースケース内で行うため、すべて未検証のまま受け取る。
#[derive(Debug, Clone, Default)]
pub struct SendSmsInput {
    pub landlord_phone: Option<String>,
    pub tenant_user_id: Option<String>,
    pub message:        Option<String>,
    pub tenant_phone:   Option<String>,
    pub tenant_name:    Option<String>,
    pub sender_id:      Option<String>,
    pub sms_type:       Option<SmsType>,
}

/// SMS 送信の結果（ゲートウェイが受け付けた場合）
#[derive(Debug, Clone, PartialEq)]
pub struct SendSmsOutcome {
    pub sent_to_raw:          String,
    pub sent_to_normalized:   String,
    pub formatted_message:    String,
    pub provider_http_status: u16,
    pub provider_response:    Value,
}

/// SMS 中継ユースケースの実装
pub struct SendSmsUseCaseImpl {
    identity_store: Arc<dyn IdentityStore>,
    sms_gateway:    Option<Arc<dyn SmsGateway>>,
}

impl SendSmsUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    ///
    /// `sms_gateway` が `None` の場合（API キー未設定）、送信は常に
    /// [`SendSmsError::ApiKeyNotSet`] で失敗する。
    pub fn new(
        identity_store: Arc<dyn IdentityStore>,
        sms_gateway: Option<Arc<dyn SmsGateway>>,
    ) -> Self {
        Self {
            identity_store,
            sms_gateway,
        }
    }

    pub fn ensure_ready(&self) -> Result<(), SendSmsError> {
        self.gateway().map(|_| ())
    }

    fn gateway(&self) -> Result<&Arc<dyn SmsGateway>, SendSmsError> {
        self.sms_gateway.as_ref().ok_or(SendSmsError::ApiKeyNotSet)
    }

    /// SMS を組み立てて送信する
    #[tracing::instrument(skip_all)]
    pub async fn send(&self, input: SendSmsInput) -> Result<SendSmsOutcome, SendSmsError> {
        let gateway = self.gateway()?;

        // 必須フィールド（この順で検証する）
        let landlord_phone = require_text("landlord_phone", input.landlord_phone.as_deref())?;
        let tenant_user_id = require_text("tenant_user_id", input.tenant_user_id.as_deref())?;
        let message = require_text("message", input.message.as_deref())?;

        let recipient = PhMobileNumber::parse(landlord_phone)?;

        let overrides =
            IdentityOverrides::new(input.tenant_name.as_deref(), input.tenant_phone.as_deref());
        let records = if overrides.is_complete() {
            Vec::new()
        } else {
            self.lookup_records(tenant_user_id).await
        };
        let identity = overrides.resolve(&records);

        let sms = SmsMessage {
            recipient,
            sender_id: input
                .sender_id
                .unwrap_or_else(|| DEFAULT_SENDER_ID.to_string()),
            sms_type: input.sms_type.unwrap_or_default(),
            body: compose(&identity, message),
        };

        let sent_to_raw = input.landlord_phone.unwrap_or_default();

        let result = gateway.send(&sms).await;
        match result {
            Ok(GatewayResult {
                success: true,
                http_status,
                provider_response,
            }) => {
                log_business_event!(
                    event.category = event::category::SMS,
                    event.action = event::action::SMS_SENT,
                    event.entity_type = event::entity_type::TENANT,
                    event.entity_id = %tenant_user_id,
                    event.result = event::result::SUCCESS,
                    sms.recipient = %sms.recipient,
                    provider.http_status = http_status,
                    "SMS 送信成功"
                );
                Ok(SendSmsOutcome {
                    sent_to_raw,
                    sent_to_normalized: sms.recipient.into_string(),
                    formatted_message: sms.body,
                    provider_http_status: http_status,
                    provider_response,
                })
            }
            Ok(GatewayResult {
                http_status,
                provider_response,
                ..
            }) => {
                log_business_event!(
                    event.category = event::category::SMS,
                    event.action = event::action::SMS_FAILED,
                    event.entity_type = event::entity_type::TENANT,
                    event.entity_id = %tenant_user_id,
                    event.result = event::result::FAILURE,
                    sms.recipient = %sms.recipient,
                    provider.http_status = http_status,
                    "SMS 送信失敗: ゲートウェイが受け付けませんでした"
                );
                Err(gateway_rejected(sent_to_raw, sms, provider_response))
            }
            Err(e) => {
                tracing::error!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = log_error::kind::GATEWAY,
                    error.message = %e,
                    "SMS ゲートウェイとの通信に失敗しました"
                );
                log_business_event!(
                    event.category = event::category::SMS,
                    event.action = event::action::SMS_FAILED,
                    event.entity_type = event::entity_type::TENANT,
                    event.entity_id = %tenant_user_id,
                    event.result = event::result::FAILURE,
                    sms.recipient = %sms.recipient,
                    "SMS 送信失敗: 通信エラー"
                );
                Err(gateway_rejected(sent_to_raw, sms, Value::String(e.to_string())))
            }
        }
    }

    /// 3 つの検索元を並行に問い合わせ、見つかったレコードを優先順に返す
    async fn lookup_records(&self, tenant_user_id: &str) -> Vec<TenantRecord> {
        let [first, second, third] = TenantSource::PRIORITY;
        let (first, second, third) = tokio::join!(
            self.lookup(first, tenant_user_id),
            self.lookup(second, tenant_user_id),
            self.lookup(third, tenant_user_id),
        );
        [first, second, third].into_iter().flatten().collect()
    }

    async fn lookup(&self, source: TenantSource, tenant_user_id: &str) -> Option<TenantRecord> {
        match self.identity_store.fetch_one(source, tenant_user_id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    error.category = log_error::category::EXTERNAL_SERVICE,
                    error.kind = log_error::kind::IDENTITY_LOOKUP,
                    lookup.source = %source,
                    error.message = %e,
                    "識別情報の取得に失敗しました（見つからなかったものとして続行）"
                );
                None
            }
        }
    }
}

fn gateway_rejected(sent_to_raw: String, sms: SmsMessage, provider_response: Value) -> SendSmsError {
    SendSmsError::GatewayRejected(Box::new(GatewayFailure {
        sent_to_raw,
        sent_to_normalized: sms.recipient.into_string(),
        formatted_message: sms.body,
        provider_response,
    }))
}
