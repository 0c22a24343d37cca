/// 設定管理モジュール
///
/// このモジュールは2層の設定構造を提供します:
/// 1. AppConfig - ビルド時に埋め込まれる静的設定（APP_CONFIG）
/// 2. UserConfig - 実行時に読み込まれる動的設定（APIキー、セッション等）
///
/// # 使用例
///
/// ```no_run
/// use garagetv::config::{APP_CONFIG, UserConfig};
///
/// let endpoint = &APP_CONFIG.api.endpoint;
///
/// let user_config = UserConfig::load()?;
/// let api_key = user_config.get_api_key()?;
/// # Ok::<(), garagetv::config::error::ConfigError>(())
/// ```
pub mod app;
pub mod error;
pub mod permissions;
pub mod user;

pub use app::APP_CONFIG;
pub use error::ConfigError;
pub use user::{SessionConfig, UserConfig};
