/// 動画コマンド
///
/// 動画の詳細取得と、ユーザートークンが必要な操作
/// （コメント、評価、削除、URLアップロード）を実行します。
use crate::commands::client;
use crate::commands::result::{ActionResult, CommandResult, VideoAction, VideoResult};
use anyhow::{Context, Result};
use garagetv::UploadOptions;

/// 動画詳細コマンドを実行
pub async fn show(video_id: &str) -> Result<CommandResult> {
    let (_, client) = client::load()?;
    let video = client
        .get_video(video_id)
        .await
        .with_context(|| format!("Failed to fetch video {}", video_id))?;

    Ok(CommandResult::Video(VideoResult {
        video,
        uploaded: false,
    }))
}

/// コメントコマンドを実行
pub async fn comment(video_id: &str, text: &str) -> Result<CommandResult> {
    let (config, client) = client::load()?;
    let token = config.get_token()?;

    client
        .comment_video(video_id, token, text)
        .await
        .with_context(|| format!("Failed to comment on video {}", video_id))?;

    Ok(action(VideoAction::Commented, video_id))
}

/// 評価コマンドを実行
///
/// # Arguments
/// * `rating` - 検証済みの評価値（1〜5）
pub async fn rate(video_id: &str, rating: u8) -> Result<CommandResult> {
    let (config, client) = client::load()?;
    let token = config.get_token()?;

    client
        .rate_video(video_id, token, rating)
        .await
        .with_context(|| format!("Failed to rate video {}", video_id))?;

    Ok(action(VideoAction::Rated, video_id))
}

/// 削除コマンドを実行
pub async fn delete(video_id: &str) -> Result<CommandResult> {
    let (config, client) = client::load()?;
    let token = config.get_token()?;

    client
        .delete_video(video_id, token)
        .await
        .with_context(|| format!("Failed to delete video {}", video_id))?;

    Ok(action(VideoAction::Deleted, video_id))
}

/// URLアップロードコマンドを実行
pub async fn upload_url(url: &str, options: UploadOptions) -> Result<CommandResult> {
    let (config, client) = client::load()?;
    let token = config.get_token()?;

    let video = client
        .upload_url(token, url, &options)
        .await
        .with_context(|| format!("Failed to upload {}", url))?;

    Ok(CommandResult::Video(VideoResult {
        video,
        uploaded: true,
    }))
}

fn action(action: VideoAction, video_id: &str) -> CommandResult {
    CommandResult::Action(ActionResult {
        action,
        video_id: video_id.to_string(),
    })
}
