//! ドメインサービス: XML要素からレコードへの変換
//!
//! 各フィールドは対応する子要素があるときだけ設定する。
//! 変換に失敗した値（読めない日付など）はフィールドごと省略し、エラーにはしない。
use crate::api::types::{CollectionRecord, UserRecord, VideoOwner, VideoRecord};
use crate::api::xml::XmlNode;
use crate::domain::coerce::{duration_in_seconds, latin1, to_bool, to_int, to_timestamp};

/// `userinfo` 要素をユーザーレコードに変換する
pub fn map_user(node: &XmlNode) -> UserRecord {
    let raw = |name: &str| node.child_text(name).map(str::to_string);
    let text = |name: &str| node.child_text(name).map(latin1);
    let flag = |name: &str| node.child_text(name).map(to_bool);
    let int = |name: &str| node.child_text(name).map(to_int);
    let date = |name: &str| {
        node.child_text(name)
            .and_then(|value| to_timestamp(&latin1(value)))
    };

    UserRecord {
        id: raw("id"),
        date_created: date("datecreated"),
        has_avatar: flag("hasavatar"),
        avatar_url: raw("avatarurl"),
        is_group: flag("isgroup"),
        language: text("language"),
        last_login: date("lastlogin"),
        total_friends: int("totalfriends"),
        total_posts: int("totalposts"),
        account_status: text("accountstatus"),
        is_banned: flag("isbanned"),
        banned_until: date("banneduntil"),
        ban_reason: text("banreason"),
        display_name: text("displayname"),
        name: text("name"),
        email: text("email"),
        birthdate: text("birthdate"),
        location: text("location"),
        country_id: text("countryid"),
        country_name: text("countryname"),
        bio: text("bio"),
        occupation: text("occupation"),
        interests: text("interests"),
        web_address: text("webaddress"),
        signature: text("signature"),
    }
}

/// `videoinfo` 要素を動画レコードに変換する
pub fn map_video(node: &XmlNode) -> VideoRecord {
    let raw = |name: &str| node.child_text(name).map(str::to_string);
    let text = |name: &str| node.child_text(name).map(latin1);
    let int = |name: &str| node.child_text(name).map(to_int);

    let duration = text("duration");
    let duration_in_seconds = duration.as_deref().map(duration_in_seconds);

    let owner = VideoOwner {
        id: raw("userid"),
        username: raw("username"),
        avatar: raw("useravatar"),
    };
    let has_owner = owner.id.is_some() || owner.username.is_some() || owner.avatar.is_some();

    VideoRecord {
        id: raw("id"),
        name: text("name"),
        description: text("description").map(|d| d.trim().to_string()),
        duration,
        duration_in_seconds,
        rating: int("rating"),
        post_date: node
            .child_text("postdate")
            .and_then(|value| to_timestamp(&latin1(value))),
        views: int("views"),
        thumbnail_url: text("thumbnail"),
        image_url: text("image"),
        video_url: text("video"),
        tvvideo_url: text("tvvideo"),
        mp4video_url: text("mp4video"),
        viewer_url: text("viewer"),
        embed_code: text("embedcode"),
        user: has_owner.then_some(owner),
    }
}

/// `categoryinfo` / `galleryinfo` 要素を一覧項目に変換する
///
/// この3項目は要素がなくても空文字列・0で埋める。
pub fn map_collection(node: &XmlNode) -> CollectionRecord {
    CollectionRecord {
        id: node.child_text("id").unwrap_or_default().to_string(),
        name: latin1(node.child_text("name").unwrap_or_default()),
        video_count: to_int(node.child_text("videocount").unwrap_or_default()),
    }
}
