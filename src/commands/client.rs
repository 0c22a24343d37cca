/// ユーザー設定からAPIクライアントを組み立てる
use anyhow::{Context, Result};
use garagetv::ApiClient;
use garagetv::config::UserConfig;

/// 設定済みのAPIキー、タイムアウト、User-Agentでクライアントを作成
///
/// # Errors
/// APIキーが未設定の場合は ConfigError::ApiKeyNotFound
pub fn build(config: &UserConfig) -> Result<ApiClient> {
    let api_key = config.get_api_key()?;
    let mut client = ApiClient::new(api_key).context("Failed to create API client")?;

    if let Some(timeout) = config.timeout_seconds {
        client.set_timeout(timeout);
    }
    if let Some(user_agent) = &config.user_agent {
        client.set_user_agent(user_agent.as_str());
    }

    Ok(client)
}

/// ユーザー設定を読み込み、クライアントと組にして返す
pub fn load() -> Result<(UserConfig, ApiClient)> {
    let config = UserConfig::load().context("Failed to load configuration file")?;
    let client = build(&config)?;
    Ok((config, client))
}

/// 表示用にAPIキーをマスキング（先頭4文字のみ残す）
pub fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
