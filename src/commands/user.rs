/// ユーザーコマンド（プロフィール、投稿動画、お気に入り）
use crate::commands::client;
use crate::commands::result::{CommandResult, ProfileResult, VideoListResult};
use anyhow::{Context, Result};
use garagetv::Paging;

/// ユーザーの指定方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRef {
    Id(String),
    Name(String),
}

impl UserRef {
    fn label(&self) -> String {
        match self {
            Self::Id(id) => format!("user #{}", id),
            Self::Name(name) => name.clone(),
        }
    }
}

/// プロフィールコマンドを実行
pub async fn profile(user: &UserRef) -> Result<CommandResult> {
    let (_, client) = client::load()?;

    let user_record = match user {
        UserRef::Id(id) => client.get_user_profile(id).await,
        UserRef::Name(name) => client.get_user_profile_by_username(name).await,
    }
    .with_context(|| format!("Failed to fetch profile of {}", user.label()))?;

    Ok(CommandResult::Profile(ProfileResult { user: user_record }))
}

/// 投稿動画コマンドを実行
///
/// ユーザーIDで指定した場合はユーザートークンが必要です。
pub async fn videos(user: &UserRef, paging: Paging, adult: bool) -> Result<CommandResult> {
    let (config, client) = client::load()?;

    let videos = match user {
        UserRef::Id(id) => {
            let token = config.get_token()?;
            client.get_user_videos(id, token, paging, adult).await
        }
        UserRef::Name(name) => client.get_user_videos_by_username(name, paging, adult).await,
    }
    .with_context(|| format!("Failed to fetch videos of {}", user.label()))?;

    Ok(CommandResult::Videos(VideoListResult {
        title: format!("Videos by {}", user.label()),
        videos,
    }))
}

/// お気に入りコマンドを実行
pub async fn favorites(user_id: &str, paging: Paging, adult: bool) -> Result<CommandResult> {
    let (config, client) = client::load()?;
    let token = config.get_token()?;

    let videos = client
        .get_user_favorite_videos(user_id, token, paging, adult)
        .await
        .with_context(|| format!("Failed to fetch favorites of user #{}", user_id))?;

    Ok(CommandResult::Videos(VideoListResult {
        title: format!("Favorites of user #{}", user_id),
        videos,
    }))
}
