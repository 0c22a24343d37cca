//! リクエストパラメータ
//!
//! パラメータは追加した順にクエリ文字列へ並ぶ。値は送信時に
//! Latin-1 変換とURLエンコードを受ける（`ApiClient::build_url`）。
use crate::api::types::Paging;
use chrono::NaiveDateTime;

/// 公開日時の送信書式（`YYYYMMDD-HHmm`、24時間制）
const PUBLISH_DATE_FORMAT: &str = "%Y%m%d-%H%M";

/// タグ・チャンネルの区切り文字
const LIST_SEPARATOR: &str = "+";

/// 順序付きのパラメータ列
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(&'static str, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// 文字列パラメータを追加
    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.pairs.push((name, value.into()));
        self
    }

    /// 整数パラメータを追加
    pub fn int(self, name: &'static str, value: impl Into<i64>) -> Self {
        let value: i64 = value.into();
        self.text(name, value.to_string())
    }

    /// 真偽値パラメータを追加（真は `1`、偽は空文字列）
    pub fn flag(self, name: &'static str, value: bool) -> Self {
        self.text(name, if value { "1" } else { "" })
    }

    /// 値があるときだけ追加
    pub fn optional(self, name: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    /// 空でないときだけ `+` 区切りで追加
    pub fn list(self, name: &'static str, values: &[String]) -> Self {
        if values.is_empty() {
            self
        } else {
            self.text(name, values.join(LIST_SEPARATOR))
        }
    }

    /// 日時があるときだけ `YYYYMMDD-HHmm` で追加
    pub fn date(self, name: &'static str, value: Option<NaiveDateTime>) -> Self {
        match value {
            Some(value) => self.text(name, value.format(PUBLISH_DATE_FORMAT).to_string()),
            None => self,
        }
    }

    /// `PageIndex` / `PageSize` を追加
    pub fn paging(self, paging: Paging) -> Self {
        self.int("PageIndex", paging.page).int("PageSize", paging.per_page)
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.pairs.iter().map(|(name, value)| (*name, value.as_str()))
    }
}
