/// プレゼンテーション層: ユーザー入力処理
///
/// ログイン時のパスワードを端末またはstdinから取得します。
use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};

/// 対話的にパスワードを取得
pub fn read_password_interactive(username: &str) -> Result<String> {
    eprintln!("Logging in to GarageTV as {}...", username);
    eprintln!();

    eprint!("Password: ");
    io::stderr().flush()?;

    let mut password = String::new();
    io::stdin()
        .read_line(&mut password)
        .context("Failed to read password from input")?;

    non_empty(password, "Password cannot be empty. Please provide your password.")
}

/// stdin からパイプでパスワードを取得（1行目）
pub fn read_password_from_stdin() -> Result<String> {
    read_first_line(io::stdin().lock())
}

fn read_first_line(mut reader: impl BufRead) -> Result<String> {
    let mut password = String::new();
    reader
        .read_line(&mut password)
        .context("Failed to read password from stdin")?;

    non_empty(
        password,
        "Password cannot be empty. Please ensure the first line of stdin contains the password.",
    )
}

/// 行末の改行だけを取り除く（パスワード内の空白は保持）
fn non_empty(line: String, message: &str) -> Result<String> {
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("{}", message);
    }
    Ok(password)
}
