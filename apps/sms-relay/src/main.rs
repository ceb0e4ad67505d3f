//! # SMS 中継サーバー
//!
//! 家主向けアプリからの依頼を PhilSMS に中継する HTTP サーバー。
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ 家主向けアプリ │────▶│  SMS Relay   │────▶│   PhilSMS    │
//! │  (Browser)   │     │  port: 8000  │     │  (Gateway)   │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │   Supabase   │
//!                      │ (PostgREST)  │
//!                      └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SMS_RELAY_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `SMS_RELAY_PORT` | No | ポート番号（デフォルト: `8000`） |
//! | `PHILSMS_API_KEY` | No | PhilSMS の API キー（未設定だと送信は 500） |
//! | `PHILSMS_API_URL` | No | PhilSMS のベース URL |
//! | `SMS_GATEWAY_BACKEND` | No | `philsms`（デフォルト）または `noop` |
//! | `SUPABASE_URL` | No | 識別情報ストアの URL |
//! | `SUPABASE_SERVICE_ROLE_KEY` | No | 識別情報ストアのサービスロールキー |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用、送信はしない）
//! SMS_GATEWAY_BACKEND=noop cargo run -p rentrelay-sms-relay
//! ```

use std::net::SocketAddr;

use anyhow::Context as _;
use rentrelay_shared::observability::{TracingConfig, init_tracing};
use rentrelay_sms_relay::{app_builder::build_app, config::AppConfig};
use tokio::net::TcpListener;

/// SMS 中継サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("sms-relay");
    init_tracing(&tracing_config);
    let _tracing_guard = tracing_config.app_span().entered();

    let config = AppConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!("SMS 中継サーバーを起動します: {}:{}", config.host, config.port);

    let app = build_app(&config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} にバインドできません"))?;

    tracing::info!("SMS 中継サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await.context("サーバーが異常終了しました")?;

    Ok(())
}
