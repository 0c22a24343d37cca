//! ファイルパーミッション管理モジュール
//!
//! APIキーとユーザートークンを含む config.toml を所有者のみが
//! 読み書きできるようにする。
//!
//! Unix系 (Linux, macOS): 0600 (rw-------)
//! その他: 既定のままにする
use crate::config::error::ConfigError;
use std::path::Path;

/// 資格情報を含むファイルのパーミッションを設定
///
/// # Errors
/// ファイルが存在しない場合、またはパーミッション設定に失敗した場合。
pub fn restrict_to_owner(file_path: &Path) -> Result<(), ConfigError> {
    if !file_path.exists() {
        return Err(ConfigError::file_system(
            format!("Config file not found: {}", file_path.display()),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File does not exist"),
        ));
    }

    #[cfg(unix)]
    {
        set_unix_permissions(file_path)
    }

    #[cfg(not(unix))]
    {
        // Windowsでは既定のACLで現在のユーザーのみがアクセスできる
        Ok(())
    }
}

#[cfg(unix)]
fn set_unix_permissions(file_path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    let permissions = std::fs::Permissions::from_mode(0o600);
    std::fs::set_permissions(file_path, permissions).map_err(|e| {
        ConfigError::file_system(
            format!(
                "Failed to set permissions (0600) for config file: {}",
                file_path.display()
            ),
            e,
        )
    })
}
