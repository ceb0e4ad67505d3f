//! # アプリケーション構築
//!
//! DI（識別情報ストア・SMS ゲートウェイ・ユースケース）の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中する。

use std::{any::Any, sync::Arc};

use axum::{
    Router,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{any, get},
};
use rentrelay_infra::{
    IdentityStore,
    NoopSmsGateway,
    PhilSmsGateway,
    PostgrestIdentityStore,
    SmsGateway,
    UnconfiguredIdentityStore,
};
use rentrelay_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::{AppConfig, GatewayBackend},
    error::SendSmsError,
    handler::{SendSmsState, health_check, send_sms},
    middleware::cors,
    usecase::{SendSmsUseCase, SendSmsUseCaseImpl},
};

/// 設定から識別情報ストアを作る
///
/// 接続情報が揃っていなければ、常に失敗する実装を返す（送信自体は続行できる）。
pub fn build_identity_store(config: &AppConfig) -> Arc<dyn IdentityStore> {
    match config.identity_store_credentials() {
        Some((url, key)) => Arc::new(PostgrestIdentityStore::new(url, key)),
        None => {
            tracing::warn!(
                "SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY が未設定のため、テナント情報は検索しません"
            );
            Arc::new(UnconfiguredIdentityStore)
        }
    }
}

/// 設定から SMS ゲートウェイを作る
///
/// PhilSMS で API キーが未設定の場合は `None`（送信リクエストは 500 になる）。
pub fn build_sms_gateway(config: &AppConfig) -> Option<Arc<dyn SmsGateway>> {
    match config.gateway_backend {
        GatewayBackend::Noop => {
            tracing::warn!("SMS_GATEWAY_BACKEND=noop: SMS は送信されません");
            Some(Arc::new(NoopSmsGateway))
        }
        GatewayBackend::PhilSms => match &config.philsms_api_key {
            Some(key) => Some(Arc::new(PhilSmsGateway::new(
                &config.philsms_api_url,
                key.as_str(),
            ))),
            None => {
                tracing::warn!("PHILSMS_API_KEY が未設定です。送信リクエストはすべて失敗します");
                None
            }
        },
    }
}

/// 設定からルーターを構築する
pub fn build_app(config: &AppConfig) -> Router {
    let usecase = SendSmsUseCaseImpl::new(build_identity_store(config), build_sms_gateway(config));
    build_router(Arc::new(usecase))
}

/// ユースケースを受け取ってルーターを構築する
///
/// テストではスタブやモックを注入したユースケースを渡す。
pub fn build_router(usecase: Arc<dyn SendSmsUseCase>) -> Router {
    let state = Arc::new(SendSmsState { usecase });

    Router::new()
        .route("/", any(send_sms))
        .route("/send_sms", any(send_sms))
        .route("/health", get(health_check))
        .with_state(state)
        // レイヤー順序が重要: 下に書いたものが外側
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: スパンに request_id を含め、全ログに自動注入
        // 3. CanonicalLogLineLayer: リクエスト完了時に1行サマリログを出力（スパン内）
        // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        // 5. cors: panic 時の 500 を含む全レスポンスに CORS ヘッダーを付与
        // 6. CatchPanicLayer: ハンドラの panic を SendSmsError::Internal の 500 に変換
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(from_fn(cors))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// ハンドラの panic を [`SendSmsError::Internal`] として 500 に変換する
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    SendSmsError::Internal(detail).into_response()
}
