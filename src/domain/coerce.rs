//! テキスト値の型変換
//!
//! XMLから取り出した文字列をレコードのフィールド型に変換する。
//! どの関数も失敗しない（変換できない値は0や`None`になる）。
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// 置換文字（Latin-1で表現できない文字の代わり）
const REPLACEMENT: char = '?';

/// 日時として受け付ける書式（タイムゾーンなし、UTCとして扱う）
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

/// 日付として受け付ける書式（時刻は0時）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Latin-1 への変換パス
///
/// U+00FF を超える文字はすべて `?` に置き換える。
/// レスポンスのテキストとリクエストパラメータの両方に同じ変換をかける。
pub fn latin1(text: &str) -> String {
    text.chars()
        .map(|c| if u32::from(c) <= 0xFF { c } else { REPLACEMENT })
        .collect()
}

/// `"true"`（大文字小文字を区別しない）のときだけ真
pub fn to_bool(text: &str) -> bool {
    text.to_lowercase() == "true"
}

/// 先頭の整数部分を読み取る
///
/// 先頭の空白、符号、数字列のみを見る。数字がなければ0。
/// 範囲外の値は `i64` の上限・下限に丸める。
pub fn to_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    for digit in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| if negative { v.checked_sub(digit) } else { v.checked_add(digit) })
            .unwrap_or(if negative { i64::MIN } else { i64::MAX });
    }
    value
}

/// 日時文字列をUNIX時刻（秒）に変換する
///
/// RFC 3339、RFC 2822、ISO形式、米国式（`M/D/YYYY h:mm:ss AM`）などを受け付ける。
/// タイムゾーンのない値はUTCとして扱う。読めない場合は `None`。
pub fn to_timestamp(text: &str) -> Option<i64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.timestamp());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc2822(text) {
        return Some(datetime.timestamp());
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;

    Some(naive.and_utc().timestamp())
}

/// `mm:ss` 形式の再生時間を秒に変換する
///
/// 最初の `:` までを分、次の区切りまでを秒として合計する。
/// `:` がない場合は秒を0とみなす。
pub fn duration_in_seconds(duration: &str) -> i64 {
    let mut chunks = duration.split(':');
    let minutes = chunks.next().map(to_int).unwrap_or(0);
    let seconds = chunks.next().map(to_int).unwrap_or(0);
    minutes.saturating_mul(60).saturating_add(seconds)
}
