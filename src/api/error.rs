//! API層のエラー定義
//!
//! GarageTV API とのやり取りで発生するすべての失敗（HTTPステータス異常、
//! XMLの破損、Failure/Warning エンベロープ、期待するノードの欠落）は
//! 単一の `ApiError` として表現される。
//!
//! メッセージの決定順序:
//! 1. 明示的なメッセージがあればそれを使う
//! 2. なければエラーコード表から引く
//! 3. 表にないコードは汎用メッセージにフォールバックする
use crate::error_severity::ErrorSeverity;
use thiserror::Error;

/// 原因エラーの型（reqwest や XML パーサのエラーを保持する）
type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 「不正なレスポンス」を表すエラーコード
pub const INVALID_RESPONSE: i64 = 1;

#[derive(Error, Debug)]
#[error("{message}")]
pub struct ApiError {
    code: Option<i64>,
    message: String,
    #[source]
    source: Option<Cause>,
}

impl ApiError {
    /// メッセージとコードからエラーを作成
    ///
    /// メッセージが `None` の場合はコード表から解決する。
    pub fn new(message: Option<String>, code: Option<i64>) -> Self {
        let message = match (message, code) {
            (Some(message), _) => message,
            (None, Some(code)) => describe_code(code)
                .map(str::to_string)
                .unwrap_or_else(|| format!("API Error. Unknown error code ({}).", code)),
            (None, None) => "API Error.".to_string(),
        };

        Self {
            code,
            message,
            source: None,
        }
    }

    /// エラーコードのみからエラーを作成
    pub fn from_code(code: i64) -> Self {
        Self::new(None, Some(code))
    }

    /// サーバーが返したメッセージからエラーを作成（コードなし）
    pub fn with_message(message: impl Into<String>) -> Self {
        Self::new(Some(message.into()), None)
    }

    /// 不正なレスポンス（コード1）
    pub fn invalid_response() -> Self {
        Self::from_code(INVALID_RESPONSE)
    }

    /// 200以外のHTTPステータス
    pub fn bad_status(status: u16) -> Self {
        Self::new(
            Some(format!("Invalid response-headers ({})", status)),
            Some(i64::from(status)),
        )
    }

    /// 原因エラーを付与する
    pub fn with_source(mut self, source: impl Into<Cause>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// エラーコード
    pub fn code(&self) -> Option<i64> {
        self.code
    }

    /// 解決済みのメッセージ
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 不正なレスポンス（コード1）かどうか
    pub fn is_invalid_response(&self) -> bool {
        self.code == Some(INVALID_RESPONSE)
    }

    /// エラーの深刻度を返す
    ///
    /// APIキー関連（31-33）は設定エラー、パラメータ・ユーザー関連は
    /// ユーザーエラー、それ以外はシステムエラーとして扱う。
    pub fn severity(&self) -> ErrorSeverity {
        match self.code {
            Some(31..=33) => ErrorSeverity::ConfigError,
            Some(11..=21) | Some(101..=103) => ErrorSeverity::UserError,
            _ => ErrorSeverity::SystemError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&'static str> {
        match self.code {
            Some(31..=33) => Some("Check the API key with 'garagetv configure --api-key <key>'."),
            Some(101) => Some("This account has been banned and can no longer log in."),
            Some(102) => Some("Activate the account before logging in."),
            Some(103) => Some("Check the username and password, then run 'garagetv login' again."),
            Some(11..=21) => Some("Check the command arguments and try again."),
            Some(INVALID_RESPONSE) => {
                Some("The server could not be reached or returned an unexpected response.")
            }
            _ => None,
        }
    }
}

/// エラーコード表
///
/// 表にないコードは `None`。
pub fn describe_code(code: i64) -> Option<&'static str> {
    let message = match code {
        1 => "API Error. Invalid response.",
        11 => "API Error. A required parameter is missing.",
        12 => "API Error. A required parameter is empty.",
        13 => "API Error. A parameter contains an illegal or unknown value.",
        14 => "API Error. Wrong HTTP method used.",
        15 => "API Error. The HTTP request does not contain an attached file.",
        16 => "API Error. The HTTP request contains to many attached files.",
        17 => "API Error. Cannot read from the attached file.",
        18 => "API Error. No file attached or empty file attached.",
        19 => "API Error. IP Address from host is not valid.",
        20 => "API Error. Not a valid Phonenumber, no users or groups found.",
        21 => "API Error. Not a direct URL to a videofile.",
        31 => "APIKey Error. The specified APIKey is not valid.",
        32 => "APIKey Error. The specified APIKey is not authorized to use the specified method call.",
        33 => "APIKey Error. The specified APIKey does not exist.",
        101 => "User Error. The specified user has been banned and can no longer authenticate.",
        102 => "User Error. The account with the specified username exists but has not been activated yet.",
        103 => "User Error. The specified username or password is incorrect.",
        104 => "Internal Error. An unknown error occurred.",
        200 => "IO Error.",
        201 => "IO Error. Cannot access the specified file.",
        202 => "IO Error. The specified file is not a video file.",
        300 => "Post Error. The post with the requested postID does not exist.",
        301 => "Post Error. The local file path for the video is empty.",
        666 => "Internal Error. Please try again or contact us for more technical support.",
        _ => return None,
    };
    Some(message)
}
