//! # RentRelay 共有ユーティリティ
//!
//! このクレートは、RentRelay
//! プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, アプリ）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - tower / tracing-subscriber など重い依存は `observability` feature に閉じ込める

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
