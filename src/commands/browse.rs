/// 閲覧コマンド
///
/// カテゴリ・ギャラリーの一覧と、各種条件での動画一覧を取得します。
/// ユーザートークンは不要です。
use crate::commands::client;
use crate::commands::result::{CollectionListResult, CommandResult, VideoListResult};
use anyhow::{Context, Result};
use garagetv::{Paging, VideoRecord};

/// 動画一覧の取得条件
#[derive(Debug, Clone)]
pub enum VideoQuery {
    /// カテゴリの動画（FetchCategory）
    Category { id: String, paging: Paging, adult: bool },
    /// ギャラリーの動画（FetchGallery）
    Gallery { id: String, paging: Paging, adult: bool },
    /// カテゴリ別の動画（FetchVideosByCategory）
    ByCategory { id: String, paging: Paging, adult: bool },
    /// 今日の動画
    Today,
    /// 期間内の高評価動画
    TopRated { days: u32, paging: Paging },
    /// キーワード検索
    Search { keyword: String, paging: Paging },
}

impl VideoQuery {
    /// 一覧の見出し
    fn title(&self) -> String {
        match self {
            Self::Category { id, .. } => format!("Category {}", id),
            Self::Gallery { id, .. } => format!("Gallery {}", id),
            Self::ByCategory { id, .. } => format!("Videos in category {}", id),
            Self::Today => "Today's videos".to_string(),
            Self::TopRated { days, .. } => format!("Top rated in the last {} day(s)", days),
            Self::Search { keyword, .. } => format!("Search results for '{}'", keyword),
        }
    }
}

/// カテゴリ一覧コマンドを実行
pub async fn categories() -> Result<CommandResult> {
    let (_, client) = client::load()?;
    let items = client
        .get_categories()
        .await
        .context("Failed to fetch categories")?;

    Ok(CommandResult::Collections(CollectionListResult {
        kind: "categories",
        items,
    }))
}

/// ギャラリー一覧コマンドを実行
pub async fn galleries() -> Result<CommandResult> {
    let (_, client) = client::load()?;
    let items = client
        .get_galleries()
        .await
        .context("Failed to fetch galleries")?;

    Ok(CommandResult::Collections(CollectionListResult {
        kind: "galleries",
        items,
    }))
}

/// 動画一覧コマンドを実行
pub async fn videos(query: VideoQuery) -> Result<CommandResult> {
    let (_, client) = client::load()?;
    let title = query.title();

    let videos: Vec<VideoRecord> = match query {
        VideoQuery::Category { id, paging, adult } => {
            client.get_category(&id, paging, adult).await
        }
        VideoQuery::Gallery { id, paging, adult } => client.get_gallery(&id, paging, adult).await,
        VideoQuery::ByCategory { id, paging, adult } => {
            client.get_videos_by_category(&id, paging, adult).await
        }
        VideoQuery::Today => client.get_videos_today().await,
        VideoQuery::TopRated { days, paging } => client.get_videos_top_rated(days, paging).await,
        VideoQuery::Search { keyword, paging } => client.search_videos(&keyword, paging).await,
    }
    .with_context(|| format!("Failed to fetch videos ({})", title))?;

    Ok(CommandResult::Videos(VideoListResult { title, videos }))
}
