//! PostgREST 識別情報ストア実装
//!
//! Supabase の REST API（`/rest/v1/{table}`）に対してフィルタ付きの 1 行取得を行う。
//! 認証にはサービスロールキーを `apikey` ヘッダーと Bearer トークンの両方に使う。

use async_trait::async_trait;
use rentrelay_domain::tenant_identity::{TenantRecord, TenantSource};
use serde_json::Value;

use super::{IdentityStore, IdentityStoreError};

/// PostgREST 識別情報ストア
pub struct PostgrestIdentityStore {
    base_url:    String,
    service_key: String,
    client:      reqwest::Client,
}

impl PostgrestIdentityStore {
    /// 新しい PostgrestIdentityStore を作成する
    ///
    /// # 引数
    ///
    /// - `base_url`: Supabase プロジェクトの URL（例: `https://xyz.supabase.co`）
    /// - `service_key`: サービスロールキー
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Self {
        Self {
            base_url:    base_url.trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            client:      reqwest::Client::new(),
        }
    }

    fn endpoint(&self, source: TenantSource, tenant_user_id: &str) -> String {
        format!(
            "{}/rest/v1/{}?{}=eq.{}&select={}&limit=1",
            self.base_url,
            source.table(),
            source.filter_column(),
            urlencoding::encode(tenant_user_id),
            urlencoding::encode(source.select()),
        )
    }
}

#[async_trait]
impl IdentityStore for PostgrestIdentityStore {
    async fn fetch_one(
        &self,
        source: TenantSource,
        tenant_user_id: &str,
    ) -> Result<Option<TenantRecord>, IdentityStoreError> {
        let url = self.endpoint(source, tenant_user_id);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        first_row(response).await
    }
}

/// レスポンスから先頭行を取り出す
///
/// 配列の先頭がオブジェクトならそれをレコードとし、
/// 空配列や配列以外は「該当なし」とする。
async fn first_row(response: reqwest::Response) -> Result<Option<TenantRecord>, IdentityStoreError> {
    let status = response.status();
    let raw = response.text().await?;

    if !status.is_success() {
        return Err(IdentityStoreError::UnexpectedStatus {
            status: status.as_u16(),
            body:   raw,
        });
    }

    let data: Value =
        serde_json::from_str(&raw).map_err(|e| IdentityStoreError::InvalidBody(e.to_string()))?;

    let row = match data {
        Value::Array(rows) => rows.into_iter().next(),
        _ => None,
    };

    Ok(match row {
        Some(Value::Object(fields)) => Some(TenantRecord::new(fields)),
        _ => None,
    })
}
