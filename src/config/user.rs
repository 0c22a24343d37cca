/// ユーザー設定モジュール
///
/// 実行時にユーザーディレクトリから読み込まれる動的設定を管理します。
/// Windows: C:\Users\<User>\AppData\Roaming\garagetv\config.toml
/// macOS:   /Users/<User>/Library/Application Support/garagetv/config.toml
/// Linux:   /home/<user>/.config/garagetv/config.toml
///
/// 初回起動時にデフォルト値から自動的にconfig.tomlを作成します。
use crate::config::error::ConfigError;
use crate::config::permissions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// デフォルトのタイムゾーンオフセット（UTC）
const DEFAULT_TIMEZONE_OFFSET: i32 = 0;

/// タイムゾーンオフセットの最大値（+18時間 = 64800秒）
const MAX_TIMEZONE_OFFSET: i32 = 64800;

/// タイムゾーンオフセットの最小値（-18時間 = -64800秒）
const MIN_TIMEZONE_OFFSET: i32 = -64800;

/// ログイン中のセッション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// ログインしたユーザー名
    pub username: String,

    /// Login が返したユーザートークン
    pub token: String,
}

/// ユーザー設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// GarageTV APIキー
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// User-Agent に追加する文字列
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// リクエストのタイムアウト(秒)。未設定ならビルド時設定の値
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// タイムゾーンオフセット(秒単位)
    /// 例: UTC=0, CET(UTC+1)=3600, JST(UTC+9)=32400
    #[serde(default)]
    pub timezone_offset_seconds: i32,

    /// ログインセッション（TOMLのテーブルなので最後に置く）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionConfig>,
}

impl UserConfig {
    /// ユーザー設定ファイルのパスを取得
    ///
    /// # Errors
    /// 設定ディレクトリが取得できない場合に ConfigError::DirectoryNotFound を返します。
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .ok_or_else(|| ConfigError::directory_not_found("Failed to get user config directory"))
            .map(|config_dir| config_dir.join("garagetv").join("config.toml"))
    }

    /// ユーザー設定を読み込む
    ///
    /// 設定ファイルが存在しない場合は、デフォルトテンプレートから自動的に作成します。
    /// 読み込み後、自動的に検証を実行します（Fail Fast）。
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定したパスからユーザー設定を読み込む
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to read config file: {}", config_path.display()),
                e,
            )
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            ConfigError::parse_error(
                format!("Failed to parse config file ({})", config_path.display()),
                e,
            )
        })?;

        config.validate()?;

        Ok(config)
    }

    /// デフォルト設定ファイルを作成
    fn create_default_config(config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent(config_path)?;

        fs::write(config_path, Self::default_toml_content()).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to create default config file: {}", config_path.display()),
                e,
            )
        })?;

        permissions::restrict_to_owner(config_path)
    }

    fn ensure_parent(config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ConfigError::file_system(
                    format!("Failed to create config directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    /// デフォルトTOML設定を生成
    fn default_toml_content() -> String {
        format!(
            r#"# GarageTV CLI - User Configuration
# Set the API key with 'garagetv configure --api-key <key>'
# The session is written by 'garagetv login'

# api_key = ""
# user_agent = ""
# timeout_seconds = 60

# Timezone offset in seconds
# Examples: UTC=0, CET(UTC+1)=3600, JST(UTC+9)=32400
timezone_offset_seconds = {}
"#,
            DEFAULT_TIMEZONE_OFFSET
        )
    }

    /// ユーザー設定を保存する
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// 指定したパスにユーザー設定を保存する（0600）
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        Self::ensure_parent(config_path)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::serialize_error("Failed to serialize config", e))?;

        fs::write(config_path, content).map_err(|e| {
            ConfigError::file_system(
                format!("Failed to write config file: {}", config_path.display()),
                e,
            )
        })?;

        permissions::restrict_to_owner(config_path)
    }

    /// ユーザー設定を検証
    ///
    /// # 検証内容
    /// - api_key: 設定されている場合は空文字列でないこと
    /// - timeout_seconds: 設定されている場合は1以上
    /// - session.username / session.token: 空文字列でないこと
    /// - timezone_offset_seconds: ±18時間以内
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(api_key) = &self.api_key {
            Self::validate_not_empty(api_key, "api_key")?;
        }

        if self.timeout_seconds == Some(0) {
            return Err(ConfigError::validation_error(
                "timeout_seconds must be at least 1",
            ));
        }

        if let Some(session) = &self.session {
            Self::validate_not_empty(&session.username, "session.username")?;
            Self::validate_not_empty(&session.token, "session.token")?;
        }

        Self::validate_timezone_offset(self.timezone_offset_seconds)
    }

    fn validate_not_empty(value: &str, field_name: &str) -> Result<(), ConfigError> {
        if value.trim().is_empty() {
            return Err(ConfigError::validation_error(format!(
                "{} cannot be empty",
                field_name
            )));
        }
        Ok(())
    }

    fn validate_timezone_offset(offset: i32) -> Result<(), ConfigError> {
        if !(MIN_TIMEZONE_OFFSET..=MAX_TIMEZONE_OFFSET).contains(&offset) {
            return Err(ConfigError::validation_error(format!(
                "Invalid timezone offset '{}' seconds. Must be between {} and {} (±18 hours)",
                offset, MIN_TIMEZONE_OFFSET, MAX_TIMEZONE_OFFSET
            )));
        }
        Ok(())
    }

    /// APIキーを取得
    ///
    /// # Errors
    /// 未設定の場合に ConfigError::ApiKeyNotFound を返します。
    pub fn get_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::ApiKeyNotFound)
    }

    /// セッションを設定
    pub fn set_session(&mut self, username: String, token: String) {
        self.session = Some(SessionConfig { username, token });
    }

    /// セッションを取得
    ///
    /// # Errors
    /// ログインしていない場合に ConfigError::TokenNotFound を返します。
    pub fn get_session(&self) -> Result<&SessionConfig, ConfigError> {
        self.session.as_ref().ok_or_else(|| {
            ConfigError::token_not_found("No user token stored. Please run 'garagetv login' first.")
        })
    }

    /// ユーザートークンを取得
    pub fn get_token(&self) -> Result<&str, ConfigError> {
        self.get_session().map(|session| session.token.as_str())
    }

    /// セッションが存在するかチェック
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// セッションを削除
    pub fn clear_session(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_path(dir: &TempDir) -> PathBuf {
        dir.path().join("garagetv").join("config.toml")
    }

    #[test]
    fn test_config_path() {
        let path = UserConfig::config_path().expect("Failed to get config path");
        assert!(path.to_string_lossy().contains("garagetv"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_load_creates_default_if_not_exists() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_path(&dir);

        let config = UserConfig::load_from(&path).expect("Default config should load");
        assert!(path.exists(), "Config file should be created");
        assert!(config.api_key.is_none());
        assert!(!config.has_session());
        assert_eq!(config.timezone_offset_seconds, 0);

        let content = fs::read_to_string(&path).expect("Failed to read config");
        assert!(content.contains("timezone_offset_seconds"));
        assert!(content.contains("garagetv configure"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_path(&dir);

        let mut config = UserConfig {
            api_key: Some("KEY".to_string()),
            user_agent: Some("MyApp/1.0".to_string()),
            timeout_seconds: Some(15),
            session: None,
            timezone_offset_seconds: 3600,
        };
        config.set_session("alice".to_string(), "TOKEN".to_string());
        config.save_to(&path).expect("Failed to save config");

        let loaded = UserConfig::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded.get_api_key().unwrap(), "KEY");
        assert_eq!(loaded.user_agent.as_deref(), Some("MyApp/1.0"));
        assert_eq!(loaded.timeout_seconds, Some(15));
        assert_eq!(loaded.get_token().unwrap(), "TOKEN");
        assert_eq!(loaded.get_session().unwrap().username, "alice");
        assert_eq!(loaded.timezone_offset_seconds, 3600);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_path(&dir);
        UserConfig::default().save_to(&path).expect("Failed to save config");

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut config = UserConfig::default();
        assert!(matches!(
            config.get_token(),
            Err(ConfigError::TokenNotFound { .. })
        ));

        config.set_session("bob".to_string(), "T".to_string());
        assert!(config.has_session());
        assert_eq!(config.get_token().unwrap(), "T");

        config.clear_session();
        assert!(!config.has_session());
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            UserConfig::default().get_api_key(),
            Err(ConfigError::ApiKeyNotFound)
        ));
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let config = UserConfig {
            api_key: Some("  ".to_string()),
            ..UserConfig::default()
        };
        match config.validate() {
            Err(ConfigError::ValidationError { message }) => assert!(message.contains("api_key")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }

        let mut config = UserConfig::default();
        config.set_session("alice".to_string(), "".to_string());
        match config.validate() {
            Err(ConfigError::ValidationError { message }) => {
                assert!(message.contains("session.token"))
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_zero_timeout_and_bad_offset() {
        let config = UserConfig {
            timeout_seconds: Some(0),
            ..UserConfig::default()
        };
        assert!(config.validate().is_err());

        let config = UserConfig {
            timezone_offset_seconds: 90000,
            ..UserConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_path(&dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "api_key = [").unwrap();

        assert!(matches!(
            UserConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
