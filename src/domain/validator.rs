/// ドメインサービス: 引数バリデーション
///
/// APIに送る前にコマンド引数を検証する。
/// ライブラリのメソッド自体は値を検証せず、そのままサーバーに渡す。
use crate::api::types::Paging;
use crate::domain::error::DomainError;
use chrono::{NaiveDate, NaiveDateTime};

/// 評価値の範囲
const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// 公開日時として受け付ける書式
const PUBLISH_DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// 評価値（1〜5）を検証する
pub fn validate_rating(value: i64) -> Result<u8, DomainError> {
    if !RATING_RANGE.contains(&value) {
        return Err(DomainError::InvalidRating { value });
    }
    // 1..=5 なので u8 に収まる
    Ok(value as u8)
}

/// ページ番号と件数を検証する
pub fn validate_paging(page: u32, per_page: u32) -> Result<Paging, DomainError> {
    if page == 0 {
        return Err(DomainError::InvalidPaging { field: "page" });
    }
    if per_page == 0 {
        return Err(DomainError::InvalidPaging { field: "per_page" });
    }
    Ok(Paging::new(page, per_page))
}

/// 空でない文字列引数を検証する（前後の空白は除去）
pub fn require_text<'a>(value: &'a str, field: &'static str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyArgument { field });
    }
    Ok(trimmed)
}

/// 公開日時の引数を解釈する
///
/// 日付のみの場合は 00:00 とする。
pub fn parse_publish_date(input: &str) -> Result<NaiveDateTime, DomainError> {
    let trimmed = input.trim();

    PUBLISH_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| DomainError::invalid_publish_date(input))
}

/// カンマ区切りの引数をリストにする（空要素は除く）
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
