//! APIメソッド
//!
//! 各操作は同じ流れをたどる: パラメータを組み立てる → 呼び出す →
//! エンベロープを検証する → 決まったパスを取り出す（なければコード1）→
//! レコードに変換する。
use crate::api::client::{ApiClient, ApiResult};
use crate::api::error::ApiError;
use crate::api::params::Params;
use crate::api::types::{
    CategoryRecord, GalleryRecord, Paging, PingOutcome, UploadOptions, UserRecord, VideoRecord,
};
use crate::api::xml::XmlNode;
use crate::domain::coerce::latin1;
use crate::domain::mapper::{map_collection, map_user, map_video};

/// `ping` が生存確認に返す応答
const PONG: &str = "Pong!";

/// 必須の要素を取り出す
fn require<'a>(root: &'a XmlNode, path: &[&str]) -> ApiResult<&'a XmlNode> {
    root.path(path).ok_or_else(ApiError::invalid_response)
}

/// 少なくとも1件ある要素の一覧を取り出す
fn require_all<'a>(root: &'a XmlNode, path: &[&str]) -> ApiResult<Vec<&'a XmlNode>> {
    let nodes = root.path_all(path);
    if nodes.is_empty() {
        return Err(ApiError::invalid_response());
    }
    Ok(nodes)
}

fn videos_at(root: &XmlNode, path: &[&str]) -> ApiResult<Vec<VideoRecord>> {
    Ok(require_all(root, path)?.into_iter().map(map_video).collect())
}

/// ユーザー単位の動画一覧（`user/videos`）
///
/// `videos` 要素があれば成功とし、`videoinfo` が0件なら空の一覧を返す。
fn user_videos(root: &XmlNode) -> ApiResult<Vec<VideoRecord>> {
    let videos = require(root, &["user", "videos"])?;
    Ok(videos.children("videoinfo").map(map_video).collect())
}

impl ApiClient {
    // --- 疎通確認 ---

    /// サーバーの生存確認
    ///
    /// ペイロードを指定した場合、サーバーはそれをそのまま返す。
    pub async fn ping(&self, payload: Option<&str>) -> ApiResult<PingOutcome> {
        let root = self
            .execute("ping", Params::new().optional("Payload", payload))
            .await?;
        let answer = latin1(require(&root, &["answer"])?.text());

        if answer == PONG {
            return Ok(PingOutcome::Alive);
        }
        // 送信したペイロードも Latin-1 変換済み
        match payload {
            Some(payload) if answer == latin1(payload) => {
                Ok(PingOutcome::Echoed(payload.to_string()))
            }
            _ => Ok(PingOutcome::Unexpected(answer)),
        }
    }

    /// APIのバージョン
    pub async fn get_version(&self) -> ApiResult<String> {
        let root = self.execute("GetVersion", Params::new()).await?;
        Ok(latin1(require(&root, &["answer"])?.text()))
    }

    // --- 認証 ---

    /// ユーザーを認証し、ユーザートークンを返す
    ///
    /// アップロードなどユーザー単位の操作にはこのトークンが必要。
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        let params = Params::new()
            .text("UserName", username)
            .text("Password", password);
        let root = self.execute("LogOnUser", params).await?;
        Ok(latin1(require(&root, &["usertoken"])?.text()))
    }

    /// ユーザートークンを無効にする
    pub async fn logoff(&self, token: &str) -> ApiResult<()> {
        self.execute("LogOffUser", Params::new().text("UserToken", token))
            .await?;
        Ok(())
    }

    // --- カテゴリ ---

    /// カテゴリ一覧
    pub async fn get_categories(&self) -> ApiResult<Vec<CategoryRecord>> {
        let root = self.execute("FetchCategories", Params::new()).await?;
        Ok(require_all(&root, &["categories", "categoryinfo"])?
            .into_iter()
            .map(map_collection)
            .collect())
    }

    /// カテゴリ内の動画
    pub async fn get_category(
        &self,
        category_id: &str,
        paging: Paging,
        adult: bool,
    ) -> ApiResult<Vec<VideoRecord>> {
        let params = Params::new()
            .text("CategoryID", category_id)
            .paging(paging)
            .flag("18plus", adult);
        let root = self.execute("FetchCategory", params).await?;
        videos_at(&root, &["category", "videos", "videoinfo"])
    }

    // --- ギャラリー ---

    /// ギャラリー一覧
    pub async fn get_galleries(&self) -> ApiResult<Vec<GalleryRecord>> {
        let root = self.execute("FetchGalleries", Params::new()).await?;
        Ok(require_all(&root, &["galleries", "galleryinfo"])?
            .into_iter()
            .map(map_collection)
            .collect())
    }

    /// ギャラリー内の動画
    pub async fn get_gallery(
        &self,
        gallery_id: &str,
        paging: Paging,
        adult: bool,
    ) -> ApiResult<Vec<VideoRecord>> {
        let params = Params::new()
            .text("GalleryId", gallery_id)
            .paging(paging)
            .flag("18plus", adult);
        let root = self.execute("FetchGallery", params).await?;
        videos_at(&root, &["gallery", "videos", "videoinfo"])
    }

    // --- 動画 ---

    /// 動画にコメントする
    pub async fn comment_video(&self, video_id: &str, token: &str, comment: &str) -> ApiResult<()> {
        let params = Params::new()
            .text("VideoID", video_id)
            .text("UserToken", token)
            .text("Comment", comment);
        self.execute("CommentVideo", params).await?;
        Ok(())
    }

    /// ユーザーの動画を削除する
    pub async fn delete_video(&self, video_id: &str, token: &str) -> ApiResult<()> {
        let params = Params::new()
            .text("VideoID", video_id)
            .text("UserToken", token);
        self.execute("DeleteVideo", params).await?;
        Ok(())
    }

    /// 動画の詳細
    pub async fn get_video(&self, video_id: &str) -> ApiResult<VideoRecord> {
        let root = self
            .execute("FetchVideo", Params::new().text("VideoId", video_id))
            .await?;
        Ok(map_video(require(&root, &["video", "videoinfo"])?))
    }

    /// 動画を評価する（1〜5）
    pub async fn rate_video(&self, video_id: &str, token: &str, rating: u8) -> ApiResult<()> {
        let params = Params::new()
            .text("VideoID", video_id)
            .text("UserToken", token)
            .int("Rating", rating);
        self.execute("RateVideo", params).await?;
        Ok(())
    }

    /// カテゴリ別の動画
    pub async fn get_videos_by_category(
        &self,
        category_id: &str,
        paging: Paging,
        adult: bool,
    ) -> ApiResult<Vec<VideoRecord>> {
        let params = Params::new()
            .text("CategoryID", category_id)
            .paging(paging)
            .flag("18plus", adult);
        let root = self.execute("FetchVideosByCategory", params).await?;
        videos_at(&root, &["videos", "videoinfo"])
    }

    /// 今日のおすすめ動画
    pub async fn get_videos_today(&self) -> ApiResult<Vec<VideoRecord>> {
        let root = self.execute("FetchVideosToday", Params::new()).await?;
        videos_at(&root, &["videos", "videoinfo"])
    }

    /// 高評価の動画
    ///
    /// # Arguments
    /// * `time_window_days` - 集計期間（日）
    /// * `paging` - 既定値は `Paging::top_rated()`（1ページ20件）
    pub async fn get_videos_top_rated(
        &self,
        time_window_days: u32,
        paging: Paging,
    ) -> ApiResult<Vec<VideoRecord>> {
        let params = Params::new()
            .int("TimeWindowSizeInDays", time_window_days)
            .paging(paging);
        let root = self.execute("FetchVideosTopRated", params).await?;
        videos_at(&root, &["videos", "videoinfo"])
    }

    /// キーワード検索
    pub async fn search_videos(&self, keyword: &str, paging: Paging) -> ApiResult<Vec<VideoRecord>> {
        let params = Params::new().text("Keyword", keyword).paging(paging);
        let root = self.execute("SearchVideos", params).await?;
        videos_at(&root, &["videos", "videoinfo"])
    }

    /// URLを指定して動画をアップロードする
    ///
    /// # Arguments
    /// * `token` - `login` で得たユーザートークン
    /// * `url` - 動画ファイルへの直接URL
    /// * `options` - タイトル、タグなどの任意項目
    pub async fn upload_url(
        &self,
        token: &str,
        url: &str,
        options: &UploadOptions,
    ) -> ApiResult<VideoRecord> {
        let mut params = Params::new()
            .text("UserToken", token)
            .optional("Title", options.title.as_deref())
            .optional("Description", options.description.as_deref())
            .list("Tags", &options.tags)
            .optional("CategoryID", options.category_id.as_deref())
            .list("channels", &options.channels)
            .date("date", options.publish_at)
            .text("URL", url);
        if options.published {
            params = params.flag("published", true);
        }

        let root = self.execute("UploadURL", params).await?;
        Ok(map_video(require(&root, &["video", "videoinfo"])?))
    }

    // --- ユーザー ---

    /// ユーザーのお気に入り動画
    pub async fn get_user_favorite_videos(
        &self,
        user_id: &str,
        token: &str,
        paging: Paging,
        adult: bool,
    ) -> ApiResult<Vec<VideoRecord>> {
        let params = Params::new()
            .text("UserID", user_id)
            .text("UserToken", token)
            .paging(paging)
            .flag("18plus", adult);
        let root = self.execute("FetchUserFavoriteVideos", params).await?;
        user_videos(&root)
    }

    /// ユーザーIDでプロフィールを取得
    pub async fn get_user_profile(&self, user_id: &str) -> ApiResult<UserRecord> {
        let root = self
            .execute("FetchUserProfile", Params::new().text("UserID", user_id))
            .await?;
        Ok(map_user(require(&root, &["users", "userinfo"])?))
    }

    /// ユーザー名でプロフィールを取得
    pub async fn get_user_profile_by_username(&self, username: &str) -> ApiResult<UserRecord> {
        let root = self
            .execute(
                "FetchUserProfileByUserName",
                Params::new().text("Username", username),
            )
            .await?;
        Ok(map_user(require(&root, &["users", "userinfo"])?))
    }

    /// ユーザーIDで投稿動画を取得
    pub async fn get_user_videos(
        &self,
        user_id: &str,
        token: &str,
        paging: Paging,
        adult: bool,
    ) -> ApiResult<Vec<VideoRecord>> {
        let params = Params::new()
            .text("UserID", user_id)
            .text("UserToken", token)
            .paging(paging)
            .flag("18plus", adult);
        let root = self.execute("FetchUserVideos", params).await?;
        user_videos(&root)
    }

    /// ユーザー名で投稿動画を取得
    pub async fn get_user_videos_by_username(
        &self,
        username: &str,
        paging: Paging,
        adult: bool,
    ) -> ApiResult<Vec<VideoRecord>> {
        let params = Params::new()
            .text("UserName", username)
            .paging(paging)
            .flag("18plus", adult);
        let root = self.execute("FetchUserVideosByUserName", params).await?;
        user_videos(&root)
    }
}
