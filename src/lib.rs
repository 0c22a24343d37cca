//! GarageTV HTTP/XML API クライアント
//!
//! クエリ文字列でAPIメソッドを呼び出し、XMLエンベロープを検証して、
//! 動画・ユーザー・カテゴリ・ギャラリーのレコードに変換する。
//!
//! ```rust,no_run
//! use garagetv::{ApiClient, Paging};
//!
//! # async fn run() -> Result<(), garagetv::ApiError> {
//! let client = ApiClient::new("your-api-key")?;
//! for video in client.search_videos("rally", Paging::default()).await? {
//!     println!("{:?} {:?}", video.id, video.name);
//! }
//! # Ok(())
//! # }
//! ```
pub mod api;
pub mod config;
pub mod domain;
pub mod error_severity;

pub use api::{
    ApiClient, ApiError, ApiResult, CategoryRecord, CollectionRecord, GalleryRecord, Paging,
    PingOutcome, UploadOptions, UserRecord, VideoOwner, VideoRecord,
};
pub use error_severity::ErrorSeverity;
