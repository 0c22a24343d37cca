//! GarageTV API モジュール
//!
//! - `client`: HTTP通信（URL構築、GET、ステータス確認）
//! - `envelope`: レスポンスエンベロープの検証
//! - `methods`: 各APIメソッド
//! - `xml`: レスポンスの要素ツリー
pub mod client;
pub mod envelope;
pub mod error;
pub mod methods;
pub mod params;
pub mod types;
pub mod xml;

pub use client::{ApiClient, ApiResult};
pub use error::{ApiError, describe_code};
pub use types::{
    CategoryRecord, CollectionRecord, GalleryRecord, Paging, PingOutcome, UploadOptions,
    UserRecord, VideoOwner, VideoRecord,
};
