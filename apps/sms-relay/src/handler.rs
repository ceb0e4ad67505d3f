//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `send_sms`: SMS 中継（メソッドはハンドラ内で判定する）

pub mod health;
pub mod send_sms;

pub use health::health_check;
pub use send_sms::{SendSmsState, send_sms};
