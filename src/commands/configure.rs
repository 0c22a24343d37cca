/// 設定コマンド
///
/// APIキー、User-Agent、タイムアウト、タイムゾーンを config.toml に保存します。
/// 引数がなければ現在の設定を表示するだけです。
use crate::commands::client::mask;
use crate::commands::result::{CommandResult, ConfigureResult};
use anyhow::{Context, Result};
use garagetv::config::UserConfig;

/// 変更する設定値（None は変更しない）
#[derive(Debug, Clone, Default)]
pub struct ConfigureChanges {
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub timezone_offset_seconds: Option<i32>,
}

impl ConfigureChanges {
    fn is_empty(&self) -> bool {
        self.api_key.is_none()
            && self.user_agent.is_none()
            && self.timeout_seconds.is_none()
            && self.timezone_offset_seconds.is_none()
    }
}

/// 設定コマンドを実行
pub async fn execute(changes: ConfigureChanges) -> Result<CommandResult> {
    let config_path = UserConfig::config_path()?;
    let mut config = UserConfig::load().context("Failed to load configuration file")?;

    let updated = apply(&mut config, changes);
    if updated {
        config.validate()?;
        config.save().context("Failed to save configuration file")?;
    }

    Ok(CommandResult::Configure(ConfigureResult {
        config_path: config_path.display().to_string(),
        api_key: config.api_key.as_deref().map(mask),
        user_agent: config.user_agent.clone(),
        timeout_seconds: config.timeout_seconds,
        timezone_offset_seconds: config.timezone_offset_seconds,
        updated,
    }))
}

/// 変更を設定に反映する
///
/// 空文字列の api_key / user_agent は設定の削除とみなす。
fn apply(config: &mut UserConfig, changes: ConfigureChanges) -> bool {
    if changes.is_empty() {
        return false;
    }

    if let Some(api_key) = changes.api_key {
        config.api_key = Some(api_key.trim().to_string()).filter(|key| !key.is_empty());
    }
    if let Some(user_agent) = changes.user_agent {
        config.user_agent = Some(user_agent).filter(|agent| !agent.trim().is_empty());
    }
    if let Some(timeout) = changes.timeout_seconds {
        config.timeout_seconds = Some(timeout);
    }
    if let Some(offset) = changes.timezone_offset_seconds {
        config.timezone_offset_seconds = offset;
    }

    true
}
