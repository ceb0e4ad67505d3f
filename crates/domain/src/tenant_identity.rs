//! # テナント表示情報
//!
//! SMS 本文に載せるテナントの表示名・表示用電話番号を解決する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`TenantSource`] | 検索元コレクション | 優先順位付きの 3 つのテーブル |
//! | [`TenantRecord`] | テナントレコード | 検索元から取得した型の緩い 1 行 |
//! | [`IdentityOverrides`] | 上書き値 | リクエストで直接指定された名前・電話番号 |
//! | [`DisplayIdentity`] | 表示情報 | 本文に載せる確定済みの名前・電話番号 |
//!
//! ## 解決ルール
//!
//! - 上書き値があればそれを優先する
//! - なければ検索元を優先順に見て、最初に空でない候補を採用する
//! - 名前が見つからなければ `"Tenant"`、電話番号が見つからなければ `UNKNOWN`
//! - 電話番号はすべてベストエフォートで正規化し、失敗したら `UNKNOWN`
//!
//! 表示情報はあくまで補足であり、解決できなくても送信は止めない。

use std::fmt;

use serde_json::{Map, Value};
use strum::Display;

use crate::phone::PhMobileNumber;

/// 名前が見つからなかったときの既定値
pub const TENANT_NAME_PLACEHOLDER: &str = "Tenant";

/// 電話番号が見つからない、または正規化できなかったときの表示
pub const UNKNOWN_PHONE: &str = "UNKNOWN";

/// 氏名フィールドの候補（優先順）
const NAME_FIELDS: [&str; 4] = ["fullname", "full_name", "fullName", "name"];

/// 電話番号フィールドの候補（優先順）
const PHONE_FIELDS: [&str; 5] = ["phone", "contact_number", "mobile", "phone_number", "number"];

// =========================================================================
// TenantSource（検索元コレクション）
// =========================================================================

/// テナント情報の検索元
///
/// 宣言順がそのまま優先順位になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TenantSource {
    /// テナントプロフィール（`tenant_profile`）
    TenantProfile,
    /// ユーザー（`users`）
    User,
    /// 部屋の入居者（`room_tenants`）
    RoomTenant,
}

impl TenantSource {
    /// 優先順に並べた全検索元
    pub const PRIORITY: [TenantSource; 3] = [Self::TenantProfile, Self::User, Self::RoomTenant];

    /// テーブル名
    pub fn table(self) -> &'static str {
        match self {
            Self::TenantProfile => "tenant_profile",
            Self::User => "users",
            Self::RoomTenant => "room_tenants",
        }
    }

    /// テナントのユーザー ID で絞り込むカラム名
    pub fn filter_column(self) -> &'static str {
        match self {
            Self::User => "id",
            Self::TenantProfile | Self::RoomTenant => "user_id",
        }
    }

    /// 取得するカラム
    pub fn select(self) -> &'static str {
        match self {
            Self::User => "id,full_name,first_name,last_name,phone,contact_number",
            Self::TenantProfile | Self::RoomTenant => "*",
        }
    }
}

// =========================================================================
// TenantRecord（テナントレコード）
// =========================================================================

/// 検索元から取得した 1 行
///
/// 検索元ごとにカラム構成が異なるため、JSON オブジェクトのまま保持し、
/// フィールド名の候補リストで値を取り出す。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TenantRecord(Map<String, Value>);

impl TenantRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// フィールドをテキストとして取り出す
    ///
    /// キーが存在しない、または `null` の場合は `None`（＝存在しない）。
    /// 数値・真偽値は文字列表現に、配列・オブジェクトは空文字になる。
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(_) | Value::Object(_) => Some(String::new()),
        }
    }

    /// 候補リストのうち最初に存在するフィールドを取り出す
    fn first_present(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| self.text(key))
    }

    /// 表示名の候補
    ///
    /// 氏名フィールドのうち最初に存在するものを trim して使う。
    /// それが空なら `first_name` と `last_name` を連結する。
    pub fn name_candidate(&self) -> Option<String> {
        let full = self.first_present(&NAME_FIELDS).unwrap_or_default();
        let full = full.trim();
        if !full.is_empty() {
            return Some(full.to_string());
        }

        let first = self.text("first_name").unwrap_or_default();
        let last = self.text("last_name").unwrap_or_default();
        non_empty(format!("{} {}", first.trim(), last.trim()).trim())
    }

    /// 電話番号の候補（未正規化）
    pub fn phone_candidate(&self) -> Option<String> {
        let raw = self.first_present(&PHONE_FIELDS)?;
        non_empty(raw.trim())
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// =========================================================================
// DisplayPhone / DisplayIdentity（表示情報）
// =========================================================================

/// 表示用電話番号
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayPhone {
    /// 正規化済みの番号
    Known(PhMobileNumber),
    /// 見つからない、または正規化できなかった
    #[default]
    Unknown,
}

impl DisplayPhone {
    /// 生の値をベストエフォートで正規化する
    pub fn from_raw(raw: &str) -> Self {
        match PhMobileNumber::parse_lenient(raw) {
            Some(number) => Self::Known(number),
            None => Self::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl fmt::Display for DisplayPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(number) => write!(f, "{number}"),
            Self::Unknown => f.write_str(UNKNOWN_PHONE),
        }
    }
}

/// 本文に載せるテナントの表示情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayIdentity {
    pub name:  String,
    pub phone: DisplayPhone,
}

// =========================================================================
// IdentityOverrides（上書き値）
// =========================================================================

/// リクエストで直接指定された表示情報
///
/// 空白のみの値は未指定として扱う。電話番号は生成時に正規化する。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityOverrides {
    name:  Option<String>,
    phone: Option<DisplayPhone>,
}

impl IdentityOverrides {
    pub fn new(name: Option<&str>, phone: Option<&str>) -> Self {
        Self {
            name:  name.and_then(|n| non_empty(n.trim())),
            phone: phone
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(DisplayPhone::from_raw),
        }
    }

    /// 上書き値だけで名前と電話番号の両方が確定するか
    ///
    /// 確定する場合は検索元への問い合わせが不要。
    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.phone.as_ref().is_some_and(DisplayPhone::is_known)
    }

    /// 検索結果と組み合わせて表示情報を確定する
    ///
    /// `records` は優先順に並んでいること（取得できなかった検索元は含めない）。
    pub fn resolve(self, records: &[TenantRecord]) -> DisplayIdentity {
        let name = self
            .name
            .or_else(|| records.iter().find_map(TenantRecord::name_candidate))
            .unwrap_or_else(|| TENANT_NAME_PLACEHOLDER.to_string());

        let phone = match self.phone {
            Some(known @ DisplayPhone::Known(_)) => known,
            _ => records
                .iter()
                .find_map(TenantRecord::phone_candidate)
                .map_or(DisplayPhone::Unknown, |raw| DisplayPhone::from_raw(&raw)),
        };

        DisplayIdentity { name, phone }
    }
}
