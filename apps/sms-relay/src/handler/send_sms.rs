//! # SMS 中継ハンドラ
//!
//! 家主向けアプリから呼び出される SMS 送信エンドポイント。
//!
//! ## エンドポイント
//!
//! - `OPTIONS` - CORS プリフライト（`ok` を返す）
//! - `POST` - SMS 送信
//! - その他 - 405
//!
//! メソッドの判定をハンドラ内で行うのは、405 のボディも JSON で返すため。

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::Method,
    response::{IntoResponse, Response},
};
use rentrelay_domain::message::SmsType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::SendSmsError,
    usecase::{SendSmsInput, SendSmsOutcome, SendSmsUseCase},
};

/// SMS 中継ハンドラの共有状態
pub struct SendSmsState {
    pub usecase: Arc<dyn SendSmsUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// SMS 送信リクエスト
///
/// 未知のフィールドは無視する。`null` は未指定と同じ扱い。
#[derive(Debug, Deserialize)]
pub struct SendSmsRequest {
    pub landlord_phone: Option<String>,
    pub tenant_user_id: Option<String>,
    pub message:        Option<String>,
    pub tenant_phone:   Option<String>,
    pub tenant_name:    Option<String>,
    pub sender_id:      Option<String>,
    #[serde(rename = "type")]
    pub sms_type:       Option<SmsType>,
}

impl From<SendSmsRequest> for SendSmsInput {
    fn from(req: SendSmsRequest) -> Self {
        Self {
            landlord_phone: req.landlord_phone,
            tenant_user_id: req.tenant_user_id,
            message:        req.message,
            tenant_phone:   req.tenant_phone,
            tenant_name:    req.tenant_name,
            sender_id:      req.sender_id,
            sms_type:       req.sms_type,
        }
    }
}

/// SMS 送信成功レスポンス
#[derive(Debug, Serialize)]
pub struct SendSmsResponse {
    pub ok:                   bool,
    pub sent_to_raw:          String,
    pub sent_to_normalized:   String,
    pub formatted_message:    String,
    pub provider_http_status: u16,
    pub provider_response:    Value,
}

impl From<SendSmsOutcome> for SendSmsResponse {
    fn from(outcome: SendSmsOutcome) -> Self {
        Self {
            ok:                   true,
            sent_to_raw:          outcome.sent_to_raw,
            sent_to_normalized:   outcome.sent_to_normalized,
            formatted_message:    outcome.formatted_message,
            provider_http_status: outcome.provider_http_status,
            provider_response:    outcome.provider_response,
        }
    }
}

// --- ハンドラ ---

/// `/` および `/send_sms`
///
/// API キーの確認はボディを読む前に行う。
/// ボディの読み込み失敗（上限超過など）も JSON のエラーとして返す。
#[tracing::instrument(skip_all, fields(%method))]
pub async fn send_sms(
    State(state): State<Arc<SendSmsState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, SendSmsError> {
    if method == Method::OPTIONS {
        return Ok("ok".into_response());
    }
    if method != Method::POST {
        return Err(SendSmsError::MethodNotAllowed);
    }

    state.usecase.ensure_ready()?;

    let body = body.map_err(|e| SendSmsError::InvalidBody(e.body_text()))?;
    let req: SendSmsRequest =
        serde_json::from_slice(&body).map_err(|e| SendSmsError::InvalidBody(e.to_string()))?;

    let outcome = state.usecase.send(req.into()).await?;

    Ok(Json(SendSmsResponse::from(outcome)).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::any,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    // テスト用スタブ
    struct StubSendSmsUseCase {
        ready:    bool,
        received: Mutex<Vec<SendSmsInput>>,
    }

    impl StubSendSmsUseCase {
        fn ready() -> Self {
            Self {
                ready:    true,
                received: Mutex::new(Vec::new()),
            }
        }

        fn without_api_key() -> Self {
            Self {
                ready:    false,
                received: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SendSmsUseCase for StubSendSmsUseCase {
        fn ensure_ready(&self) -> Result<(), SendSmsError> {
            if self.ready {
                Ok(())
            } else {
                Err(SendSmsError::ApiKeyNotSet)
            }
        }

        async fn send(&self, input: SendSmsInput) -> Result<SendSmsOutcome, SendSmsError> {
            self.received.lock().unwrap().push(input.clone());
            Ok(SendSmsOutcome {
                sent_to_raw:          input.landlord_phone.unwrap_or_default(),
                sent_to_normalized:   "639171234567".to_string(),
                formatted_message:    "Tenant (UNKNOWN)\nMessage: Rent due".to_string(),
                provider_http_status: 200,
                provider_response:    json!({"status": "success"}),
            })
        }
    }

    fn create_test_app(usecase: Arc<StubSendSmsUseCase>) -> Router {
        let state = Arc::new(SendSmsState { usecase });

        Router::new()
            .route("/send_sms", any(send_sms))
            .with_state(state)
    }

    fn request(method: Method, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/send_sms")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_body(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_send_sms_成功時はokとゲートウェイ結果を返す() {
        // Given
        let usecase = Arc::new(StubSendSmsUseCase::ready());
        let sut = create_test_app(usecase.clone());

        let body = json!({
            "landlord_phone": "09171234567",
            "tenant_user_id": "abc",
            "message": "Rent due",
            "type": "unicode",
            "sender_id": null,
            "unknown_field": 1
        });

        // When
        let response = sut
            .oneshot(request(Method::POST, &body.to_string()))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(
            json,
            json!({
                "ok": true,
                "sent_to_raw": "09171234567",
                "sent_to_normalized": "639171234567",
                "formatted_message": "Tenant (UNKNOWN)\nMessage: Rent due",
                "provider_http_status": 200,
                "provider_response": {"status": "success"}
            })
        );

        let received = usecase.received.lock().unwrap();
        assert_eq!(received[0].sms_type, Some(SmsType::Unicode));
        assert_eq!(received[0].sender_id, None);
    }

    #[tokio::test]
    async fn test_send_sms_optionsはokを返す() {
        let usecase = Arc::new(StubSendSmsUseCase::without_api_key());
        let sut = create_test_app(usecase.clone());

        let response = sut.oneshot(request(Method::OPTIONS, "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        assert_eq!(read_body(response).await, b"ok");
        assert!(usecase.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_sms_post以外は405() {
        let sut = create_test_app(Arc::new(StubSendSmsUseCase::ready()));

        let response = sut.oneshot(request(Method::GET, "")).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(json, json!({"error": "Method not allowed"}));
    }

    #[tokio::test]
    async fn test_send_sms_api_key未設定はボディより先に500() {
        let usecase = Arc::new(StubSendSmsUseCase::without_api_key());
        let sut = create_test_app(usecase.clone());

        let response = sut.oneshot(request(Method::POST, "not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(json, json!({"error": "PHILSMS_API_KEY not set"}));
    }

    #[tokio::test]
    async fn test_send_sms_jsonでないボディは500() {
        let usecase = Arc::new(StubSendSmsUseCase::ready());
        let sut = create_test_app(usecase.clone());

        let response = sut.oneshot(request(Method::POST, "not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert!(json["error"].is_string());
        assert!(usecase.received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_sms_上限を超えるボディはjsonの500() {
        // Given
        let usecase = Arc::new(StubSendSmsUseCase::ready());
        let sut = create_test_app(usecase.clone());
        let oversized = format!(
            r#"{{"message": "{}"}}"#,
            "a".repeat(3 * 1024 * 1024)
        );

        // When
        let response = sut.oneshot(request(Method::POST, &oversized)).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        let json: Value = serde_json::from_slice(&read_body(response).await).unwrap();
        assert!(json["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert!(usecase.received.lock().unwrap().is_empty());
    }
}
