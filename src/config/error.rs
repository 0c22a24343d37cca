//! Config層のエラー定義
//!
//! 設定ファイルの読み込み、書き込み、パースに関するエラーを構造化して定義。
//! 外部エラー(std::io::Error, toml::de::Error等)の発信元を #[source] で保持する。
use crate::error_severity::ErrorSeverity;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// 設定ディレクトリの取得失敗
    #[error("config directory unavailable: {message}")]
    DirectoryNotFound { message: String },

    /// ファイルシステムエラー
    #[error("config file I/O failed: {context}")]
    FileSystem {
        context: String,
        #[source]
        source: io::Error,
    },

    /// 設定ファイルのパースエラー
    #[error("invalid config file: {context}")]
    ParseError {
        context: String,
        #[source]
        source: toml::de::Error,
    },

    /// 設定ファイルのシリアライズエラー
    #[error("could not encode config: {context}")]
    SerializeError {
        context: String,
        #[source]
        source: toml::ser::Error,
    },

    /// 設定の検証エラー
    #[error("invalid setting: {message}")]
    ValidationError { message: String },

    /// APIキーが未設定
    #[error("API key is not configured")]
    ApiKeyNotFound,

    /// ユーザートークンが未保存（未ログイン）
    #[error("not logged in: {message}")]
    TokenNotFound { message: String },
}

impl ConfigError {
    pub fn directory_not_found(message: impl Into<String>) -> Self {
        Self::DirectoryNotFound {
            message: message.into(),
        }
    }

    pub fn file_system(context: impl Into<String>, source: io::Error) -> Self {
        Self::FileSystem {
            context: context.into(),
            source,
        }
    }

    pub fn parse_error(context: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ParseError {
            context: context.into(),
            source,
        }
    }

    pub fn serialize_error(context: impl Into<String>, source: toml::ser::Error) -> Self {
        Self::SerializeError {
            context: context.into(),
            source,
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn token_not_found(message: impl Into<String>) -> Self {
        Self::TokenNotFound {
            message: message.into(),
        }
    }

    /// エラーの深刻度を返す
    ///
    /// 終了コードの決定に使用できる
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::FileSystem { .. } => ErrorSeverity::SystemError,
            Self::TokenNotFound { .. } => ErrorSeverity::UserError,
            Self::DirectoryNotFound { .. }
            | Self::ParseError { .. }
            | Self::SerializeError { .. }
            | Self::ValidationError { .. }
            | Self::ApiKeyNotFound => ErrorSeverity::ConfigError,
        }
    }

    /// ユーザー向けのヒントメッセージを返す
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::DirectoryNotFound { .. } => {
                Some("No user config directory is known for this platform. Check HOME or XDG_CONFIG_HOME.")
            }
            Self::FileSystem { .. } => {
                Some("Make sure the garagetv config directory exists and is writable by you.")
            }
            Self::ParseError { .. } => {
                Some("Fix the TOML syntax, or delete the file so a fresh template is written.")
            }
            Self::SerializeError { .. } => {
                Some("The settings could not be written as TOML. Re-run 'garagetv configure' with plain values.")
            }
            Self::ValidationError { .. } => {
                Some("Correct the reported value with 'garagetv configure' or by editing config.toml.")
            }
            Self::ApiKeyNotFound => Some("Set your API key with 'garagetv configure --api-key <key>'."),
            Self::TokenNotFound { .. } => Some("Run 'garagetv login <username>' first."),
        }
    }
}
