//! # SMS 中継サーバー設定
//!
//! 環境変数から設定を読み込む。起動時に 1 度だけ読み込み、以降は変更しない。
//!
//! 空文字列の環境変数は未設定として扱う。

use std::{env, str::FromStr};

use rentrelay_infra::sms_gateway::DEFAULT_PHILSMS_URL;
use strum::EnumString;
use thiserror::Error;

/// 既定のバインドアドレス
const DEFAULT_HOST: &str = "0.0.0.0";

/// 既定のポート番号
const DEFAULT_PORT: u16 = 8000;

/// SMS ゲートウェイの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GatewayBackend {
   /// PhilSMS に送信する
   #[default]
   PhilSms,
   /// 送信せずログ出力のみ
   Noop,
}

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
   #[error("SMS_RELAY_PORT は有効なポート番号である必要があります: {0:?}")]
   InvalidPort(String),

   #[error("SMS_GATEWAY_BACKEND は philsms または noop である必要があります: {0:?}")]
   InvalidGatewayBackend(String),
}

/// SMS 中継サーバーの設定
#[derive(Debug, Clone)]
pub struct AppConfig {
   /// バインドアドレス
   pub host: String,
   /// ポート番号
   pub port: u16,
   /// PhilSMS の API キー（未設定なら送信リクエストは 500 になる）
   pub philsms_api_key: Option<String>,
   /// PhilSMS のベース URL
   pub philsms_api_url: String,
   /// SMS ゲートウェイの種類
   pub gateway_backend: GatewayBackend,
   /// 識別情報ストア（Supabase）の URL
   pub supabase_url: Option<String>,
   /// 識別情報ストアのサービスロールキー
   pub supabase_service_role_key: Option<String>,
}

impl AppConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|key| env::var(key).ok())
   }

   /// 任意の参照関数から設定を読み込む
   ///
   /// テスト間で環境変数の競合を避けるため、読み込み元を差し替えられるようにしている。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

      let port = match var("SMS_RELAY_PORT") {
         Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(raw))?,
         None => DEFAULT_PORT,
      };

      let gateway_backend = match var("SMS_GATEWAY_BACKEND") {
         Some(raw) => GatewayBackend::from_str(raw.trim())
            .map_err(|_| ConfigError::InvalidGatewayBackend(raw))?,
         None => GatewayBackend::default(),
      };

      Ok(Self {
         host: var("SMS_RELAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
         port,
         philsms_api_key: var("PHILSMS_API_KEY"),
         philsms_api_url: var("PHILSMS_API_URL").unwrap_or_else(|| DEFAULT_PHILSMS_URL.to_string()),
         gateway_backend,
         supabase_url: var("SUPABASE_URL"),
         supabase_service_role_key: var("SUPABASE_SERVICE_ROLE_KEY"),
      })
   }

   /// 識別情報ストアの接続情報（URL とキーの両方が揃っている場合のみ）
   pub fn identity_store_credentials(&self) -> Option<(&str, &str)> {
      match (&self.supabase_url, &self.supabase_service_role_key) {
         (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
         _ => None,
      }
   }
}
