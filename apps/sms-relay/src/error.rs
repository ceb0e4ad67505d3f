//! # SMS 中継エラー定義
//!
//! 送信処理で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー | ステータス |
//! |--------|-----------|
//! | 必須フィールド欠落・送信先番号が不正 | 400 |
//! | POST / OPTIONS 以外 | 405 |
//! | API キー未設定・ボディ不正・内部エラー | 500 |
//! | ゲートウェイの拒否・通信失敗 | 502 |

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use rentrelay_domain::DomainError;
use rentrelay_shared::{ErrorResponse, event_log::error as log_error};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// ゲートウェイ失敗時の診断情報
///
/// 502 レスポンスのボディにそのまま展開される。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayFailure {
   /// リクエストで受け取った送信先（未加工）
   pub sent_to_raw:        String,
   /// 正規化済みの送信先
   pub sent_to_normalized: String,
   /// 組み立てた本文
   pub formatted_message:  String,
   /// ゲートウェイのレスポンスボディ（通信失敗時はエラーメッセージ）
   pub provider_response:  Value,
}

/// 502 レスポンスのボディ
#[derive(Debug, Serialize)]
struct GatewayFailureBody {
   error:   String,
   #[serde(flatten)]
   failure: GatewayFailure,
}

/// SMS 中継で発生するエラー
///
/// `Display` の文字列はそのまま API レスポンスの `error` フィールドに使われる。
#[derive(Debug, Error)]
pub enum SendSmsError {
   /// POST / OPTIONS 以外のメソッド
   #[error("Method not allowed")]
   MethodNotAllowed,

   /// ゲートウェイの API キーが設定されていない
   #[error("PHILSMS_API_KEY not set")]
   ApiKeyNotSet,

   /// リクエストボディが JSON として読めない
   #[error("{0}")]
   InvalidBody(String),

   /// 必須フィールドが未指定
   #[error("Missing {0}")]
   MissingField(&'static str),

   /// 送信先（家主）の番号を正規化できない
   #[error("{0}")]
   InvalidRecipient(String),

   /// ゲートウェイが送信を受け付けなかった
   #[error("PhilSMS request failed")]
   GatewayRejected(Box<GatewayFailure>),

   /// 予期しない内部エラー（ハンドラの panic を含む）
   #[error("{0}")]
   Internal(String),
}

impl From<DomainError> for SendSmsError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::MissingField(field) => SendSmsError::MissingField(field),
         e @ DomainError::InvalidPhoneNumber { .. } => SendSmsError::InvalidRecipient(e.to_string()),
      }
   }
}

impl SendSmsError {
   fn status(&self) -> StatusCode {
      match self {
         SendSmsError::MissingField(_) | SendSmsError::InvalidRecipient(_) => StatusCode::BAD_REQUEST,
         SendSmsError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
         SendSmsError::GatewayRejected(_) => StatusCode::BAD_GATEWAY,
         SendSmsError::ApiKeyNotSet | SendSmsError::InvalidBody(_) | SendSmsError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
         }
      }
   }

   /// サーバー側の問題を示すエラーのみ記録する（400 系は呼び出し元の問題）
   fn log(&self) {
      match self {
         SendSmsError::ApiKeyNotSet => {
            tracing::error!(
               error.category = log_error::category::CONFIGURATION,
               error.kind = log_error::kind::MISSING_API_KEY,
               "PHILSMS_API_KEY が設定されていません"
            );
         }
         SendSmsError::InvalidBody(msg) => {
            tracing::warn!(error.message = %msg, "リクエストボディを解釈できません");
         }
         SendSmsError::Internal(msg) => {
            tracing::error!(
               error.category = log_error::category::APPLICATION,
               error.kind = log_error::kind::INTERNAL,
               "内部エラー: {}",
               msg
            );
         }
         _ => {}
      }
   }
}

impl IntoResponse for SendSmsError {
   fn into_response(self) -> Response {
      let status = self.status();

      match self {
         SendSmsError::GatewayRejected(failure) => {
            let body = GatewayFailureBody {
               error:   "PhilSMS request failed".to_string(),
               failure: *failure,
            };
            (status, Json(body)).into_response()
         }
         other => {
            other.log();
            (status, Json(ErrorResponse::new(other.to_string()))).into_response()
         }
      }
   }
}
