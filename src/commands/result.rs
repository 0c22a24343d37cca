/// コマンド実行結果を表す型
///
/// 各コマンドはこの型を返し、プレゼンテーション層で
/// 人間向けと機械向けの出力フォーマットを決定する。
use garagetv::{CollectionRecord, PingOutcome, UserRecord, VideoRecord};
use serde::Serialize;

/// コマンド実行結果の統一型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Configure(ConfigureResult),
    Ping(PingResult),
    Version(VersionResult),
    Login(LoginResult),
    Logout(LogoutResult),
    Status(StatusResult),
    Collections(CollectionListResult),
    Videos(VideoListResult),
    Video(VideoResult),
    Profile(ProfileResult),
    Action(ActionResult),
}

/// configure コマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct ConfigureResult {
    /// 設定ファイルのパス
    pub config_path: String,
    /// マスキングされたAPIキー
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub timezone_offset_seconds: i32,
    /// 値を書き換えたか（false なら表示のみ）
    pub updated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PingResult {
    pub outcome: PingOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionResult {
    pub version: String,
}

/// ログインコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub username: String,
    /// 既にログイン済みだったか（上書き更新の場合true）
    pub was_logged_in: bool,
}

/// ログアウトコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResult {
    /// ログイン状態だったか
    pub was_logged_in: bool,
    /// サーバー側でトークンを無効化できたか
    pub server_logged_off: bool,
}

/// ステータスコマンドの結果
#[derive(Debug, Clone, Serialize)]
pub struct StatusResult {
    /// マスキングされたAPIキー（設定されている場合）
    pub api_key: Option<String>,
    /// ログイン中のユーザー名
    pub username: Option<String>,
    /// GetVersion の応答（到達できた場合）
    pub server_version: Option<String>,
    /// 到達できなかった場合のエラー
    pub server_error: Option<String>,
}

/// カテゴリ・ギャラリー一覧
#[derive(Debug, Clone, Serialize)]
pub struct CollectionListResult {
    /// "categories" または "galleries"
    pub kind: &'static str,
    pub items: Vec<CollectionRecord>,
}

/// 動画一覧
#[derive(Debug, Clone, Serialize)]
pub struct VideoListResult {
    /// 一覧の見出し（例: "Search results for 'rally'"）
    pub title: String,
    pub videos: Vec<VideoRecord>,
}

/// 動画詳細
#[derive(Debug, Clone, Serialize)]
pub struct VideoResult {
    pub video: VideoRecord,
    /// UploadURL の結果か
    pub uploaded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResult {
    pub user: UserRecord,
}

/// 動画に対する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoAction {
    Commented,
    Rated,
    Deleted,
}

/// comment / rate / delete の結果
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    pub action: VideoAction,
    pub video_id: String,
}

impl CommandResult {
    /// 成功メッセージを取得（人間向け出力用）
    pub fn success_message(&self) -> String {
        match self {
            CommandResult::Configure(r) => {
                if r.updated {
                    "Configuration saved.".to_string()
                } else {
                    "Current configuration:".to_string()
                }
            }
            CommandResult::Ping(r) => match &r.outcome {
                PingOutcome::Alive => "Server is alive.".to_string(),
                PingOutcome::Echoed(answer) => format!("Server echoed: {}", answer),
                PingOutcome::Unexpected(answer) => format!("Unexpected answer: {}", answer),
            },
            CommandResult::Version(r) => format!("API version: {}", r.version),
            CommandResult::Login(r) => {
                if r.was_logged_in {
                    format!("Logged in as {} (previous session replaced).", r.username)
                } else {
                    format!("Logged in as {}.", r.username)
                }
            }
            CommandResult::Logout(r) => {
                if r.was_logged_in {
                    "Logged out successfully.".to_string()
                } else {
                    "Already logged out.".to_string()
                }
            }
            CommandResult::Status(r) => {
                if r.server_version.is_some() {
                    "Connected".to_string()
                } else {
                    "Not connected".to_string()
                }
            }
            CommandResult::Collections(r) => format!("Found {} {}.", r.items.len(), r.kind),
            CommandResult::Videos(r) => format!("{}: {} video(s)", r.title, r.videos.len()),
            CommandResult::Video(r) => {
                if r.uploaded {
                    "Upload accepted!".to_string()
                } else {
                    "Video details:".to_string()
                }
            }
            CommandResult::Profile(_) => "User profile:".to_string(),
            CommandResult::Action(r) => match r.action {
                VideoAction::Commented => format!("Comment posted on video {}.", r.video_id),
                VideoAction::Rated => format!("Rating saved for video {}.", r.video_id),
                VideoAction::Deleted => format!("Video {} deleted.", r.video_id),
            },
        }
    }
}
