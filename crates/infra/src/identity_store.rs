//! # 識別情報ストア
//!
//! テナントの表示情報を取得するための読み取り専用データソース。
//!
//! ## 設計方針
//!
//! - **1 行取得のみ**: 検索元ごとにテナントのユーザー ID で絞り込み、先頭 1 行だけを返す
//! - **失敗は呼び出し側で吸収**: 取得失敗はエラーとして返すが、送信処理を止めるかどうかは
//!   ユースケース層が決める（表示情報はベストエフォート）
//! - **2 つの実装**: PostgREST（本番用）、未設定（接続情報がない環境用）

mod postgrest;

use async_trait::async_trait;
pub use postgrest::PostgrestIdentityStore;
use rentrelay_domain::tenant_identity::{TenantRecord, TenantSource};
use thiserror::Error;

/// 識別情報ストアのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityStoreError {
    /// 接続情報が設定されていない
    #[error("識別情報ストアが設定されていません（SUPABASE_URL / SUPABASE_SERVICE_ROLE_KEY）")]
    NotConfigured,

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 成功以外のステータス
    #[error("予期しないステータス {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// レスポンスボディが JSON ではない
    #[error("JSON ではないレスポンス: {0}")]
    InvalidBody(String),
}

impl From<reqwest::Error> for IdentityStoreError {
    fn from(err: reqwest::Error) -> Self {
        IdentityStoreError::Network(err.to_string())
    }
}

/// 識別情報ストアトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// 検索元からテナントの 1 行を取得する
    ///
    /// ## 戻り値
    ///
    /// - `Ok(Some(record))`: 該当行あり
    /// - `Ok(None)`: 該当行なし
    /// - `Err(IdentityStoreError)`: 取得失敗
    async fn fetch_one(
        &self,
        source: TenantSource,
        tenant_user_id: &str,
    ) -> Result<Option<TenantRecord>, IdentityStoreError>;
}

/// 接続情報が未設定の環境で使う実装
///
/// すべての取得が [`IdentityStoreError::NotConfigured`] で失敗する。
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredIdentityStore;

#[async_trait]
impl IdentityStore for UnconfiguredIdentityStore {
    async fn fetch_one(
        &self,
        _source: TenantSource,
        _tenant_user_id: &str,
    ) -> Result<Option<TenantRecord>, IdentityStoreError> {
        Err(IdentityStoreError::NotConfigured)
    }
}
