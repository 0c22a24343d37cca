/// 疎通確認コマンド（ping / version）
use crate::commands::client;
use crate::commands::result::{CommandResult, PingResult, VersionResult};
use anyhow::{Context, Result};

/// ping コマンドを実行
///
/// # Arguments
/// * `payload` - サーバーにそのまま返してもらう文字列
pub async fn execute_ping(payload: Option<&str>) -> Result<CommandResult> {
    let (_, client) = client::load()?;

    let outcome = client.ping(payload).await.context("Ping failed")?;

    Ok(CommandResult::Ping(PingResult { outcome }))
}

/// version コマンドを実行
pub async fn execute_version() -> Result<CommandResult> {
    let (_, client) = client::load()?;

    let version = client
        .get_version()
        .await
        .context("Failed to get API version")?;

    Ok(CommandResult::Version(VersionResult { version }))
}
