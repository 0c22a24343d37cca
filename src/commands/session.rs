/// セッションコマンド（login / logout / status）
///
/// Login で得たユーザートークンを config.toml に保存し、
/// 書き込み系の操作（コメント、評価、削除、アップロード）で使います。
use crate::commands::client;
use crate::commands::result::{CommandResult, LoginResult, LogoutResult, StatusResult};
use crate::presentation::input;
use anyhow::{Context, Result};
use garagetv::config::UserConfig;
use tracing::warn;

/// ログインコマンドを実行
///
/// # Arguments
/// * `username` - GarageTV のユーザー名
/// * `use_stdin` - true の場合、パスワードを標準入力の1行目から読む
pub async fn login(username: &str, use_stdin: bool) -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;
    let client = client::build(&config)?;

    let password = if use_stdin {
        input::read_password_from_stdin()?
    } else {
        input::read_password_interactive(username)?
    };

    let token = client
        .login(username, &password)
        .await
        .context("Login failed. Please verify your username and password.")?;

    let was_logged_in = config.has_session();
    config.set_session(username.to_string(), token);
    config
        .save()
        .context("Failed to save configuration file")?;

    Ok(CommandResult::Login(LoginResult {
        username: username.to_string(),
        was_logged_in,
    }))
}

/// ログアウトコマンドを実行
///
/// サーバー側の無効化に失敗しても、保存済みのトークンは削除します。
pub async fn logout() -> Result<CommandResult> {
    let mut config = UserConfig::load().context("Failed to load configuration file")?;

    let Some(session) = config.session.clone() else {
        return Ok(CommandResult::Logout(LogoutResult {
            was_logged_in: false,
            server_logged_off: false,
        }));
    };

    let server_logged_off = match client::build(&config) {
        Ok(client) => match client.logoff(&session.token).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "server-side logoff failed, removing local session anyway");
                false
            }
        },
        Err(e) => {
            warn!(error = %e, "cannot reach the API, removing local session only");
            false
        }
    };

    config.clear_session();
    config
        .save()
        .context("Failed to save configuration file")?;

    Ok(CommandResult::Logout(LogoutResult {
        was_logged_in: true,
        server_logged_off,
    }))
}

/// ステータスコマンドを実行
///
/// APIキーがあれば GetVersion でサーバーへの到達を確認します。
pub async fn status() -> Result<CommandResult> {
    let config = UserConfig::load().context("Failed to load configuration file")?;

    let api_key = config.api_key.as_deref().map(client::mask);
    let username = config.session.as_ref().map(|s| s.username.clone());

    let (server_version, server_error) = match client::build(&config) {
        Ok(client) => match client.get_version().await {
            Ok(version) => (Some(version), None),
            Err(e) => (None, Some(e.to_string())),
        },
        Err(e) => (None, Some(e.to_string())),
    };

    Ok(CommandResult::Status(StatusResult {
        api_key,
        username,
        server_version,
        server_error,
    }))
}
