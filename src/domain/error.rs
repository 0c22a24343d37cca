/// ドメイン層のエラー定義
///
/// コマンド引数の制約違反を構造化して定義。
/// 外部クレートのエラーは含まず、純粋にドメインの制約違反を表現する。
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    /// 評価値が範囲外
    #[error("invalid rating: {value} (expected 1 to 5)")]
    InvalidRating { value: i64 },

    /// ページ指定が不正
    #[error("invalid paging: {field} must be at least 1")]
    InvalidPaging { field: &'static str },

    /// 公開日時を解釈できない
    #[error("invalid publish date: '{input}'")]
    InvalidPublishDate { input: String },

    /// 必須の文字列引数が空
    #[error("{field} cannot be empty")]
    EmptyArgument { field: &'static str },
}

impl DomainError {
    pub fn invalid_publish_date(input: impl Into<String>) -> Self {
        Self::InvalidPublishDate {
            input: input.into(),
        }
    }

    /// エラーの深刻度を返す
    ///
    /// 引数の誤りなので常にユーザーエラー
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::UserError
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::InvalidRating { .. } => Some("Give a rating between 1 and 5."),
            Self::InvalidPaging { .. } => Some("Pages start at 1 and must hold at least one video."),
            Self::InvalidPublishDate { .. } => {
                Some("Use 'YYYY-MM-DD HH:MM' or 'YYYY-MM-DDTHH:MM' (24-hour clock).")
            }
            Self::EmptyArgument { .. } => None,
        }
    }
}
