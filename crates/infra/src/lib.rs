//! # RentRelay インフラ層
//!
//! 外部サービスとの通信を担当する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: 外部サービスごとに trait を定義し、ユースケース層は trait にのみ依存
//! - **単発の同期的中継**: リトライ・キューイングは行わない
//! - **テスト容易性**: `test-utils` feature でモック実装を公開
//!
//! ## モジュール構成
//!
//! - [`identity_store`] - テナント識別情報ストア（PostgREST）
//! - [`sms_gateway`] - SMS ゲートウェイ（PhilSMS）
//! - `mock` - テスト用モック（`test-utils` feature 有効時のみ）

pub mod identity_store;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod sms_gateway;

pub use identity_store::{
    IdentityStore,
    IdentityStoreError,
    PostgrestIdentityStore,
    UnconfiguredIdentityStore,
};
pub use sms_gateway::{GatewayResult, NoopSmsGateway, PhilSmsGateway, SmsGateway, SmsGatewayError};
