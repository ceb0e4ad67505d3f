//! # フィリピン携帯電話番号
//!
//! 入力データに現れる様々な表記の携帯電話番号を、ゲートウェイが受け付ける
//! 唯一の形式 `639XXXXXXXXX` に正規化する。
//!
//! ## 受け付ける表記
//!
//! | 入力例 | 説明 | 正規化結果 |
//! |--------|------|-----------|
//! | `09171234567` | 国内表記（先頭 0） | `639171234567` |
//! | `9171234567` | 10 桁 | `639171234567` |
//! | `+63 917 123 4567` | 国際表記 | `639171234567` |
//! | `6309171234567` | 国番号の後に 0 が混入した既知の不正データ | `639171234567` |
//!
//! ## 厳格モードとベストエフォートモード
//!
//! 変換ロジックは [`canonicalize`] の 1 か所のみ。呼び出し側が 2 つある:
//!
//! - [`PhMobileNumber::parse`]: 実際の送信先に使う。失敗はエラー
//! - [`PhMobileNumber::parse_lenient`]: 表示専用の番号に使う。失敗は `None`

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::DomainError;

/// 正規化後の番号の形式: `63` + `9` + 9 桁
static CANONICAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^639\d{9}$").expect("正規表現が不正です"));

/// 正規化を試みる（検証はしない）
///
/// 1. 前後の空白を除去し、数字と `+` 以外を取り除く。先頭の `+` は捨てる
/// 2. `09` で始まる 11 文字 → 先頭の `0` を `63` に置換
/// 3. `9` で始まる 10 文字 → 先頭に `63` を付与
/// 4. `6309` で始まる 13 文字 → `63` + 4 文字目以降
fn canonicalize(raw: &str) -> String {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let mut p = match stripped.strip_prefix('+') {
        Some(rest) => rest.to_string(),
        None => stripped,
    };

    if p.starts_with("09") && p.len() == 11 {
        p = format!("63{}", &p[1..]);
    }

    if p.starts_with('9') && p.len() == 10 {
        p = format!("63{p}");
    }

    if p.starts_with("6309") && p.len() == 13 {
        p = format!("63{}", &p[3..]);
    }

    p
}

/// 正規化済みのフィリピン携帯電話番号（値オブジェクト）
///
/// # 不変条件
///
/// - `^639\d{9}$` に一致する（12 文字、記号なし）
///
/// # 使用例
///
/// ```rust
/// use rentrelay_domain::phone::PhMobileNumber;
///
/// let number = PhMobileNumber::parse("0917-123-4567").unwrap();
/// assert_eq!(number.as_str(), "639171234567");
///
/// assert!(PhMobileNumber::parse_lenient("12345").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhMobileNumber(String);

impl PhMobileNumber {
    /// 厳格に正規化する
    ///
    /// # エラー
    ///
    /// 正規化後の値が形式に一致しない場合は
    /// [`DomainError::InvalidPhoneNumber`] を返す。
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let transformed = canonicalize(raw);
        if !CANONICAL_PATTERN.is_match(&transformed) {
            return Err(DomainError::InvalidPhoneNumber {
                original: raw.to_string(),
                transformed,
            });
        }
        Ok(Self(transformed))
    }

    /// ベストエフォートで正規化する（失敗時は `None`）
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        Self::parse(raw).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PhMobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::国内表記("09171234567", "639171234567")]
    #[case::十桁("9171234567", "639171234567")]
    #[case::国番号後の0混入("6309171234567", "639171234567")]
    #[case::プラス付き国際表記("+639171234567", "639171234567")]
    #[case::正規化済み("639171234567", "639171234567")]
    #[case::区切り文字あり("  0917-123-4567 ", "639171234567")]
    #[case::括弧と空白("+63 (917) 123 4567", "639171234567")]
    #[case::プラス付き0混入("+6309171234567", "639171234567")]
    fn test_parse_正規化できる(#[case] input: &str, #[case] expected: &str) {
        let number = PhMobileNumber::parse(input).unwrap();

        assert_eq!(number.as_str(), expected);
    }

    #[rstest]
    #[case::短すぎる("12345")]
    #[case::空文字("")]
    #[case::固定電話("0281234567")]
    #[case::桁数超過("091712345678")]
    #[case::二重プラス("++639171234567")]
    #[case::他国番号("+14155551212")]
    #[case::文字のみ("not a number")]
    fn test_parse_不正な番号はエラー(#[case] input: &str) {
        let result = PhMobileNumber::parse(input);

        assert!(
            matches!(result, Err(DomainError::InvalidPhoneNumber { .. })),
            "エラーになること: {input:?} -> {result:?}"
        );
    }

    #[rstest]
    #[case("12345")]
    #[case("")]
    #[case("abc")]
    fn test_parse_lenient_不正な番号はnone(#[case] input: &str) {
        assert_eq!(PhMobileNumber::parse_lenient(input), None);
    }

    #[test]
    fn test_parse_lenient_正しい番号は厳格モードと同じ結果() {
        assert_eq!(
            PhMobileNumber::parse_lenient("09171234567"),
            Some(PhMobileNumber::parse("09171234567").unwrap())
        );
    }

    #[test]
    fn test_parse_エラーに元の値と変換後の値が含まれる() {
        let error = PhMobileNumber::parse(" 12-345 ").unwrap_err();

        assert_eq!(
            error,
            DomainError::InvalidPhoneNumber {
                original:    " 12-345 ".to_string(),
                transformed: "12345".to_string(),
            }
        );
    }

    #[rstest]
    #[case("09171234567")]
    #[case("9998887777")]
    #[case("+63 905 000 1111")]
    fn test_parse_正規化結果を再入力しても変わらない(#[case] input: &str) {
        let once = PhMobileNumber::parse(input).unwrap();
        let twice = PhMobileNumber::parse(once.as_str()).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_09始まり11桁は63と末尾9桁になる() {
        for suffix in ["000000000", "123456789", "999999999"] {
            let input = format!("09{suffix}");
            let number = PhMobileNumber::parse(&input).unwrap();

            assert_eq!(number.as_str(), format!("639{suffix}"));
        }
    }

    #[test]
    fn test_displayは正規化済みの値を出力する() {
        let number = PhMobileNumber::parse("09171234567").unwrap();

        assert_eq!(number.to_string(), "639171234567");
    }

    #[test]
    fn test_jsonシリアライズは文字列になる() {
        let number = PhMobileNumber::parse("09171234567").unwrap();

        assert_eq!(
            serde_json::to_value(&number).unwrap(),
            serde_json::json!("639171234567")
        );
    }
}
