//! # SMS メッセージ
//!
//! 家主に送る SMS 本文の組み立てと、ゲートウェイに渡す送信メッセージを定義する。
//!
//! ## 本文フォーマット
//!
//! ```text
//! {テナント名} ({電話番号 または UNKNOWN})
//! Message: {trim 済みのメッセージ}
//! ```

use serde::{Deserialize, Serialize};

use crate::{phone::PhMobileNumber, tenant_identity::DisplayIdentity};

/// 送信者名の既定値
pub const DEFAULT_SENDER_ID: &str = "PhilSMS";

/// SMS の文字種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsType {
    /// GSM 文字のみ
    #[default]
    Plain,
    /// Unicode（絵文字・多言語）
    Unicode,
}

/// 送信本文を組み立てる
///
/// 同じ入力からは常に同じ本文が得られる。`message` は trim する以外に加工しない。
pub fn compose(identity: &DisplayIdentity, message: &str) -> String {
    format!(
        "{} ({})\nMessage: {}",
        identity.name,
        identity.phone,
        message.trim()
    )
}

/// ゲートウェイに渡す送信メッセージ
///
/// 本文の組み立て結果。`SmsGateway` に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// 送信先（家主）
    pub recipient: PhMobileNumber,
    /// 送信者名
    pub sender_id: String,
    /// 文字種別
    pub sms_type:  SmsType,
    /// 本文
    pub body:      String,
}
