mod cli;
mod commands;
mod presentation;

use clap::Parser;
use cli::Cli;
use garagetv::ApiError;
use garagetv::config::{APP_CONFIG, ConfigError, UserConfig};
use garagetv::domain::DomainError;
use presentation::output::{self, ErrorReport, OutputOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    let machine = cli.machine;
    let result = cli::dispatch(cli.command).await;

    match result {
        Ok(result) => {
            let options = OutputOptions {
                machine,
                timezone_offset_seconds: UserConfig::load()
                    .map(|config| config.timezone_offset_seconds)
                    .unwrap_or_default(),
            };
            if let Err(e) = output::output_result(&result, options) {
                handle_error(e, machine);
            }
        }
        Err(e) => handle_error(e, machine),
    }
}

/// ログ出力を初期化（stderr）
///
/// RUST_LOG があればそれを、なければビルド時設定のレベルを使う。
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&APP_CONFIG.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// エラーハンドリングとユーザーへの表示
///
/// anyhow::Error から元のエラー型を downcast して、
/// エラーの種類に応じた exit code とメッセージを決定する。
fn handle_error(error: anyhow::Error, machine: bool) -> ! {
    let report = ErrorReport {
        error: error.to_string(),
        causes: error.chain().skip(1).map(|cause| cause.to_string()).collect(),
        exit_code: determine_exit_code(&error),
        api_code: error
            .chain()
            .find_map(|cause| cause.downcast_ref::<ApiError>())
            .and_then(ApiError::code),
        hint: get_error_hint(&error),
    };

    output::output_error(&report, machine);
    std::process::exit(report.exit_code);
}

/// エラーチェーンから適切な終了コードを決定
fn determine_exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.severity().exit_code();
        }
        if let Some(api_err) = cause.downcast_ref::<ApiError>() {
            return api_err.severity().exit_code();
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.severity().exit_code();
        }
    }

    // 不明なエラーの場合はデフォルトの終了コード
    1
}

/// エラーに対するユーザー向けヒントを取得
fn get_error_hint(error: &anyhow::Error) -> Option<String> {
    error.chain().find_map(|cause| {
        if let Some(domain_err) = cause.downcast_ref::<DomainError>() {
            return domain_err.hint().map(str::to_string);
        }
        if let Some(api_err) = cause.downcast_ref::<ApiError>() {
            return api_err.hint().map(str::to_string);
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_err.hint().map(str::to_string);
        }
        None
    })
}
