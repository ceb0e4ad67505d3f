//! # テスト用モック
//!
//! ユースケーステスト・ハンドラテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! rentrelay-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
   collections::{HashMap, HashSet},
   sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rentrelay_domain::{
   message::SmsMessage,
   tenant_identity::{TenantRecord, TenantSource},
};
use serde_json::{Map, Value, json};

use crate::{
   identity_store::{IdentityStore, IdentityStoreError},
   sms_gateway::{GatewayResult, SmsGateway, SmsGatewayError},
};

// ===== MockIdentityStore =====

#[derive(Clone, Default)]
pub struct MockIdentityStore {
   records: Arc<Mutex<HashMap<TenantSource, TenantRecord>>>,
   failing: Arc<Mutex<HashSet<TenantSource>>>,
   calls:   Arc<Mutex<Vec<(TenantSource, String)>>>,
}

impl MockIdentityStore {
   pub fn new() -> Self {
      Self::default()
   }

   /// 検索元に 1 行を登録する（JSON オブジェクト以外は空行として扱う）
   pub fn with_record(self, source: TenantSource, fields: Value) -> Self {
      let fields = match fields {
         Value::Object(map) => map,
         _ => Map::new(),
      };
      self
         .records
         .lock()
         .unwrap()
         .insert(source, TenantRecord::new(fields));
      self
   }

   /// 検索元の取得を失敗させる
   pub fn with_failure(self, source: TenantSource) -> Self {
      self.failing.lock().unwrap().insert(source);
      self
   }

   /// 記録された呼び出し（検索元, テナントユーザー ID）
   pub fn calls(&self) -> Vec<(TenantSource, String)> {
      self.calls.lock().unwrap().clone()
   }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
   async fn fetch_one(
      &self,
      source: TenantSource,
      tenant_user_id: &str,
   ) -> Result<Option<TenantRecord>, IdentityStoreError> {
      self
         .calls
         .lock()
         .unwrap()
         .push((source, tenant_user_id.to_string()));

      if self.failing.lock().unwrap().contains(&source) {
         return Err(IdentityStoreError::Network(format!("{source} に接続できません")));
      }

      Ok(self.records.lock().unwrap().get(&source).cloned())
   }
}

// ===== MockSmsGateway =====

#[derive(Clone)]
pub struct MockSmsGateway {
   outcome: Result<GatewayResult, SmsGatewayError>,
   sent:    Arc<Mutex<Vec<SmsMessage>>>,
}

impl MockSmsGateway {
   /// 常に受け付けるゲートウェイ
   pub fn accepted() -> Self {
      Self::with_outcome(Ok(GatewayResult {
         success:           true,
         http_status:       200,
         provider_response: json!({"status": "success", "data": {"uid": "mock-uid"}}),
      }))
   }

   /// 常に指定ステータスで拒否するゲートウェイ
   pub fn rejected(http_status: u16, provider_response: Value) -> Self {
      Self::with_outcome(Ok(GatewayResult {
         success: false,
         http_status,
         provider_response,
      }))
   }

   /// 常に通信エラーになるゲートウェイ
   pub fn transport_error() -> Self {
      Self::with_outcome(Err(SmsGatewayError::Transport(
         "connection refused".to_string(),
      )))
   }

   fn with_outcome(outcome: Result<GatewayResult, SmsGatewayError>) -> Self {
      Self {
         outcome,
         sent: Arc::new(Mutex::new(Vec::new())),
      }
   }

   /// 送信（試行）されたメッセージ
   pub fn sent_messages(&self) -> Vec<SmsMessage> {
      self.sent.lock().unwrap().clone()
   }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
   async fn send(&self, message: &SmsMessage) -> Result<GatewayResult, SmsGatewayError> {
      self.sent.lock().unwrap().push(message.clone());
      self.outcome.clone()
   }
}
