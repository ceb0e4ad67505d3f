//! # ユースケース層
//!
//! SMS 中継のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラのテストでスタブに差し替えられるようトレイトを定義
//! - **依存性注入**: 識別情報ストアと SMS ゲートウェイを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは HTTP の関心事のみ扱い、ロジックはユースケースに集約

pub mod send_sms;

use async_trait::async_trait;
pub use send_sms::{SendSmsInput, SendSmsOutcome, SendSmsUseCaseImpl};

use crate::error::SendSmsError;

/// SMS 中継ユースケーストレイト
#[async_trait]
pub trait SendSmsUseCase: Send + Sync {
    /// 送信できる状態か確認する
    ///
    /// ゲートウェイが設定されていなければ [`SendSmsError::ApiKeyNotSet`]。
    /// リクエストボディを読む前に呼ばれる。
    fn ensure_ready(&self) -> Result<(), SendSmsError>;

    /// 検証 → 正規化 → 識別情報解決 → 本文組み立て → 送信 を 1 回だけ行う
    ///
    /// ## 戻り値
    ///
    /// - `Ok(SendSmsOutcome)`: ゲートウェイが受け付けた
    /// - `Err(SendSmsError)`: 検証失敗、またはゲートウェイが受け付けなかった
    async fn send(&self, input: SendSmsInput) -> Result<SendSmsOutcome, SendSmsError>;
}

/// SendSmsUseCaseImpl に SendSmsUseCase トレイトを実装
#[async_trait]
impl SendSmsUseCase for SendSmsUseCaseImpl {
    fn ensure_ready(&self) -> Result<(), SendSmsError> {
        self.ensure_ready()
    }

    async fn send(&self, input: SendSmsInput) -> Result<SendSmsOutcome, SendSmsError> {
        self.send(input).await
    }
}
