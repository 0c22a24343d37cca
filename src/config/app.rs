//! アプリケーション設定モジュール
//!
//! ビルド時に config.toml から読み込まれる静的設定を管理します。
//! これらの設定は実行時には変更できません。
use serde::Deserialize;
use std::sync::LazyLock;

/// ビルド時設定（初回参照時に一度だけ解析される）
pub static APP_CONFIG: LazyLock<AppConfig> = LazyLock::new(AppConfig::load);

/// アプリケーション全体の設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

/// API関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// GarageTV API のURL
    pub endpoint: String,

    /// APIリクエストの既定タイムアウト(秒)
    pub timeout_seconds: u64,

    /// User-Agent の製品名
    pub product: String,
}

/// ロギング関連の設定
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// RUST_LOG がない場合のログレベル (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// ビルド時に埋め込まれたconfig.tomlから設定を読み込む
    ///
    /// # Panics
    /// 設定ファイルのパースに失敗した場合はパニックします。
    /// これはビルド時設定なので、実行時エラーではなくビルドの誤りとして扱います。
    pub fn load() -> Self {
        const CONFIG_STR: &str = include_str!("../../config.toml");
        toml::from_str(CONFIG_STR)
            .expect("Failed to parse embedded config.toml. This is a build-time configuration error.")
    }
}
