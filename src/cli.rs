/// CLI引数の定義とコマンドへのディスパッチ
use crate::commands::browse::VideoQuery;
use crate::commands::configure::ConfigureChanges;
use crate::commands::user::UserRef;
use crate::commands::{self, CommandResult};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use garagetv::UploadOptions;
use garagetv::api::types::{DEFAULT_PAGE_SIZE, DEFAULT_TOP_RATED_PAGE_SIZE};
use garagetv::domain::validator;

/// GarageTV command line client
#[derive(Debug, Parser)]
#[command(name = "garagetv", version)]
pub struct Cli {
    /// Output machine-readable JSON to stdout (success and error)
    #[arg(long, global = true)]
    pub machine: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or change the stored configuration
    Configure {
        /// GarageTV API key (empty string removes it)
        #[arg(long)]
        api_key: Option<String>,
        /// Text appended to the User-Agent header
        #[arg(long)]
        user_agent: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
        /// Timezone offset in seconds for displayed dates (e.g. 3600 for CET)
        #[arg(long, allow_hyphen_values = true)]
        timezone_offset: Option<i32>,
    },
    /// Check that the API answers
    Ping {
        /// Text the server should echo back
        payload: Option<String>,
    },
    /// Show the API version
    Version,
    /// Log in and store the user token
    Login {
        username: String,
        /// Read the password from the first line of stdin
        #[arg(long)]
        stdin: bool,
    },
    /// Invalidate and forget the stored user token
    Logout,
    /// Show configuration and connection status
    Status,
    /// List categories
    Categories,
    /// List the videos of a category
    Category {
        id: String,
        #[command(flatten)]
        listing: Listing,
    },
    /// List galleries
    Galleries,
    /// List the videos of a gallery
    Gallery {
        id: String,
        #[command(flatten)]
        listing: Listing,
    },
    /// Show a video
    Video { id: String },
    /// Comment on a video (requires login)
    Comment { video_id: String, text: String },
    /// Rate a video from 1 to 5 (requires login)
    Rate { video_id: String, rating: i64 },
    /// Delete one of your videos (requires login)
    Delete { video_id: String },
    /// List today's videos
    Today,
    /// List the top rated videos
    TopRated {
        /// Time window in days
        #[arg(long, default_value_t = 7)]
        days: u32,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_TOP_RATED_PAGE_SIZE)]
        per_page: u32,
    },
    /// Search videos by keyword
    Search {
        keyword: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        per_page: u32,
    },
    /// List videos by category
    ByCategory {
        id: String,
        #[command(flatten)]
        listing: Listing,
    },
    /// Show a user profile
    Profile {
        #[command(flatten)]
        user: UserSelector,
    },
    /// List the videos of a user (by id requires login)
    UserVideos {
        #[command(flatten)]
        user: UserSelector,
        #[command(flatten)]
        listing: Listing,
    },
    /// List the favorite videos of a user (requires login)
    Favorites {
        user_id: String,
        #[command(flatten)]
        listing: Listing,
    },
    /// Upload a video from a URL (requires login)
    UploadUrl {
        url: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Comma separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Comma separated channel names
        #[arg(long)]
        channels: Option<String>,
        /// Publish date, e.g. "2024-03-09 17:05"
        #[arg(long)]
        date: Option<String>,
        /// Publish immediately (premium accounts)
        #[arg(long)]
        published: bool,
    },
}

/// ページ指定と成人向けフラグ
#[derive(Debug, Args)]
pub struct Listing {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    per_page: u32,
    /// Include 18+ videos
    #[arg(long)]
    adult: bool,
}

/// ユーザーID またはユーザー名
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct UserSelector {
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: Option<String>,
}

impl UserSelector {
    fn into_ref(self) -> UserRef {
        match (self.id, self.name) {
            (Some(id), _) => UserRef::Id(id),
            (None, Some(name)) => UserRef::Name(name),
            // clap の group で片方が必須
            (None, None) => UserRef::Name(String::new()),
        }
    }
}

/// コマンドを実行して結果を返す
pub async fn dispatch(command: Command) -> Result<CommandResult> {
    match command {
        Command::Configure {
            api_key,
            user_agent,
            timeout,
            timezone_offset,
        } => {
            commands::configure::execute(ConfigureChanges {
                api_key,
                user_agent,
                timeout_seconds: timeout,
                timezone_offset_seconds: timezone_offset,
            })
            .await
        }
        Command::Ping { payload } => commands::ping::execute_ping(payload.as_deref()).await,
        Command::Version => commands::ping::execute_version().await,
        Command::Login { username, stdin } => {
            let username = validator::require_text(&username, "username")?;
            commands::session::login(username, stdin).await
        }
        Command::Logout => commands::session::logout().await,
        Command::Status => commands::session::status().await,
        Command::Categories => commands::browse::categories().await,
        Command::Galleries => commands::browse::galleries().await,
        Command::Category { id, listing } => {
            let paging = validator::validate_paging(listing.page, listing.per_page)?;
            commands::browse::videos(VideoQuery::Category {
                id,
                paging,
                adult: listing.adult,
            })
            .await
        }
        Command::Gallery { id, listing } => {
            let paging = validator::validate_paging(listing.page, listing.per_page)?;
            commands::browse::videos(VideoQuery::Gallery {
                id,
                paging,
                adult: listing.adult,
            })
            .await
        }
        Command::ByCategory { id, listing } => {
            let paging = validator::validate_paging(listing.page, listing.per_page)?;
            commands::browse::videos(VideoQuery::ByCategory {
                id,
                paging,
                adult: listing.adult,
            })
            .await
        }
        Command::Today => commands::browse::videos(VideoQuery::Today).await,
        Command::TopRated {
            days,
            page,
            per_page,
        } => {
            let paging = validator::validate_paging(page, per_page)?;
            commands::browse::videos(VideoQuery::TopRated { days, paging }).await
        }
        Command::Search {
            keyword,
            page,
            per_page,
        } => {
            let keyword = validator::require_text(&keyword, "keyword")?.to_string();
            let paging = validator::validate_paging(page, per_page)?;
            commands::browse::videos(VideoQuery::Search { keyword, paging }).await
        }
        Command::Video { id } => commands::video::show(&id).await,
        Command::Comment { video_id, text } => {
            let text = validator::require_text(&text, "comment")?;
            commands::video::comment(&video_id, text).await
        }
        Command::Rate { video_id, rating } => {
            let rating = validator::validate_rating(rating)?;
            commands::video::rate(&video_id, rating).await
        }
        Command::Delete { video_id } => commands::video::delete(&video_id).await,
        Command::Profile { user } => commands::user::profile(&user.into_ref()).await,
        Command::UserVideos { user, listing } => {
            let paging = validator::validate_paging(listing.page, listing.per_page)?;
            commands::user::videos(&user.into_ref(), paging, listing.adult).await
        }
        Command::Favorites { user_id, listing } => {
            let paging = validator::validate_paging(listing.page, listing.per_page)?;
            commands::user::favorites(&user_id, paging, listing.adult).await
        }
        Command::UploadUrl {
            url,
            title,
            description,
            tags,
            category,
            channels,
            date,
            published,
        } => {
            let options = UploadOptions {
                title,
                description,
                tags: tags.as_deref().map(validator::split_list).unwrap_or_default(),
                category_id: category,
                channels: channels
                    .as_deref()
                    .map(validator::split_list)
                    .unwrap_or_default(),
                publish_at: date
                    .as_deref()
                    .map(validator::parse_publish_date)
                    .transpose()?,
                published,
            };
            commands::video::upload_url(&url, options).await
        }
    }
}
