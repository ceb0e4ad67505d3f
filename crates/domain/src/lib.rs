//! # RentRelay ドメイン層
//!
//! 家主向け SMS 中継の中核ロジックを定義する。
//!
//! ## 設計方針
//!
//! このクレートは副作用を持たない純粋なロジックのみを提供する:
//!
//! - **値オブジェクト**: 検証済みのフィリピン携帯電話番号（[`phone::PhMobileNumber`]）
//! - **ドメインポリシー**: テナント表示情報の解決ルール（上書き → 検索 → 既定値）
//! - **メッセージ組み立て**: 送信本文の決定的な生成
//! - **ドメインエラー**: 入力検証の失敗を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! sms-relay → infra → domain
//! ```
//!
//! ドメイン層は外部サービス（識別情報ストア、SMS ゲートウェイ）には
//! 一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`message`] - SMS 本文の組み立てと送信メッセージ
//! - [`phone`] - フィリピン携帯電話番号の正規化
//! - [`tenant_identity`] - テナントレコードと表示情報の解決

pub mod error;
pub mod message;
pub mod phone;
pub mod tenant_identity;

pub use error::DomainError;
