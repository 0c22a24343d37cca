//! API通信用の型定義
//!
//! XMLレスポンスから変換したレコードと、リクエスト側のオプション型。
//! レコードの各フィールドは元の要素が存在したときだけ `Some` になり、
//! シリアライズ時には `None` のキーは出力しない。
use chrono::NaiveDateTime;
use serde::Serialize;

/// 1ページあたりの既定件数
pub const DEFAULT_PAGE_SIZE: u32 = 48;

/// 高評価動画の1ページあたりの既定件数
pub const DEFAULT_TOP_RATED_PAGE_SIZE: u32 = 20;

/// 動画情報（`videoinfo` 要素）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `mm:ss` 形式
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    /// UNIX時刻（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvvideo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp4video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_code: Option<String>,
    /// 投稿者（`userid` / `username` / `useravatar` のいずれかがある場合）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<VideoOwner>,
}

/// 動画の投稿者
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VideoOwner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// ユーザー情報（`userinfo` 要素）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// UNIX時刻（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_avatar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// UNIX時刻（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_friends: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_posts: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_banned: Option<bool>,
    /// UNIX時刻（秒）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banned_until: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// サーバーが返した文字列のまま
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// カテゴリ・ギャラリーの一覧項目
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollectionRecord {
    pub id: String,
    pub name: String,
    pub video_count: i64,
}

/// カテゴリ（`categoryinfo` 要素）
pub type CategoryRecord = CollectionRecord;

/// ギャラリー（`galleryinfo` 要素）
pub type GalleryRecord = CollectionRecord;

/// `ping` の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "answer", rename_all = "snake_case")]
pub enum PingOutcome {
    /// サーバーが `Pong!` を返した
    Alive,
    /// 送ったペイロードがそのまま返ってきた
    Echoed(String),
    /// それ以外の応答
    Unexpected(String),
}

impl PingOutcome {
    /// サーバーが応答したとみなせるか
    pub fn is_alive(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}

/// ページ指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// ページ番号（1始まり）
    pub page: u32,
    /// 1ページあたりの件数
    pub per_page: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paging {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// 高評価動画用の既定値（1ページ20件）
    pub fn top_rated() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_TOP_RATED_PAGE_SIZE,
        }
    }
}

/// `upload_url` の任意項目
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// 省略時はファイル名がタイトルになる
    pub title: Option<String>,
    pub description: Option<String>,
    /// 空の場合は送信しない（サーバーがタイトル等から生成する）
    pub tags: Vec<String>,
    pub category_id: Option<String>,
    /// 空の場合はユーザーのルートチャンネルに保存される
    pub channels: Vec<String>,
    /// 公開日時（省略時は現在時刻）
    pub publish_at: Option<NaiveDateTime>,
    /// プレミアムアカウントのみ有効
    pub published: bool,
}
