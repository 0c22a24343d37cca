/// ドメインサービス: 表示用フォーマット
///
/// Unixタイムスタンプと再生時間を人間向けの文字列に変換する。
/// タイムゾーンはユーザー設定のオフセットを適用する。
use chrono::{DateTime, FixedOffset, Utc};

/// Unixタイムスタンプをオフセット付きでフォーマット
///
/// # 戻り値
/// - UTC: "2008-05-14 10:23:00 UTC"
/// - それ以外: "2008-05-14 12:23:00 +02:00"
///
/// 範囲外のタイムスタンプやオフセットは数値のまま返す。
pub fn format_timestamp(timestamp: i64, timezone_offset_seconds: i32) -> String {
    let Some(datetime_utc) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
        return timestamp.to_string();
    };

    if timezone_offset_seconds == 0 {
        return datetime_utc.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    }

    match FixedOffset::east_opt(timezone_offset_seconds) {
        Some(offset) => datetime_utc
            .with_timezone(&offset)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string(),
        None => timestamp.to_string(),
    }
}

/// 秒数を "m:ss" または "h:mm:ss" にする
pub fn format_duration(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_utc() {
        // 1210760580 = 2008-05-14 10:23:00 UTC
        assert_eq!(format_timestamp(1210760580, 0), "2008-05-14 10:23:00 UTC");
    }

    #[test]
    fn test_format_timestamp_with_offset() {
        assert_eq!(
            format_timestamp(1210760580, 7200),
            "2008-05-14 12:23:00 +02:00"
        );
        // 日付をまたぐ
        assert_eq!(
            format_timestamp(1210760580, -36000),
            "2008-05-14 00:23:00 -10:00"
        );
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX, 0), i64::MAX.to_string());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(83), "1:23");
        assert_eq!(format_duration(3725), "1:02:05");
        assert_eq!(format_duration(-5), "0:00");
    }
}
