//! HTTPクライアント
//!
//! GarageTV API との通信を担当する。URLの組み立て、タイムアウトと
//! User-Agent を付けたGETリクエスト、HTTPステータスの確認、
//! エンベロープの検証までを行う。リトライはしない。
use crate::api::envelope;
use crate::api::error::ApiError;
use crate::api::params::Params;
use crate::api::xml::XmlNode;
use crate::config::APP_CONFIG;
use crate::domain::coerce::latin1;
use reqwest::{Client, StatusCode, header};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// APIクライアントの結果型
pub type ApiResult<T> = Result<T, ApiError>;

/// User-Agent に含めるバージョン
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// APIクライアント
///
/// 設定（APIキー、タイムアウト、User-Agent）は呼び出しごとに読み取られ、
/// セッターで呼び出しの合間に変更できる。内部の `reqwest::Client` は共有される。
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    user_agent: String,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    ///
    /// エンドポイントとタイムアウトはビルド時設定（`APP_CONFIG`）の値を使う。
    ///
    /// # Arguments
    /// * `api_key` - GarageTV のAPIキー
    pub fn new(api_key: impl Into<String>) -> ApiResult<Self> {
        Self::with_base_url(api_key, APP_CONFIG.api.endpoint.clone())
    }

    /// エンドポイントを指定してAPIクライアントを作成
    ///
    /// # Arguments
    /// * `api_key` - GarageTV のAPIキー
    /// * `base_url` - APIのURL（例: "http://www.garagetv.be/api.ashx"）
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> ApiResult<Self> {
        let http = Client::builder().build().map_err(|e| {
            ApiError::with_message(format!("Failed to create HTTP client: {}", e)).with_source(e)
        })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(APP_CONFIG.api.timeout_seconds),
            user_agent: String::new(),
        })
    }

    /// APIキーを設定
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// タイムアウト（秒）を設定
    pub fn set_timeout(&mut self, seconds: u64) {
        self.timeout = Duration::from_secs(seconds);
    }

    /// 製品名の後ろに付ける User-Agent を設定
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = user_agent.into();
    }

    /// タイムアウト（秒）
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout.as_secs()
    }

    /// 送信する User-Agent（"<製品名>/<バージョン> <追加文字列>"）
    pub fn user_agent(&self) -> String {
        let product = format!("{}/{}", APP_CONFIG.api.product, VERSION);
        if self.user_agent.is_empty() {
            product
        } else {
            format!("{} {}", product, self.user_agent)
        }
    }

    /// エンドポイント
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// リクエストURLを構築
    ///
    /// `apikey` と `method` の後に、パラメータを追加順に並べる。
    /// 値は Latin-1 変換の後にURLエンコードする。
    pub fn build_url(&self, method: &str, params: &Params) -> String {
        let mut url = format!(
            "{}?apikey={}&method={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(method)
        );

        for (name, value) in params.iter() {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(&latin1(value)));
        }

        url
    }

    /// APIメソッドを呼び出し、レスポンス本文を返す
    ///
    /// # Errors
    /// 200以外のHTTPステータスは "Invalid response-headers (<status>)"。
    /// ステータスを得られなかった場合（接続失敗、タイムアウト）と
    /// 本文を読めなかった場合はコード1 ("Invalid response")。
    /// 元の reqwest エラーは URL を除いて source に残す。
    pub async fn call(&self, method: &str, params: Params) -> ApiResult<String> {
        let url = self.build_url(method, &params);
        let started = Instant::now();

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .header(header::USER_AGENT, self.user_agent())
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                // URL にはAPIキー、パスワード、トークンが含まれる
                let e = e.without_url();
                warn!(method, timeout = e.is_timeout(), error = %e, "API request produced no response");
                return Err(ApiError::invalid_response().with_source(e));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(method, status = status.as_u16(), "API returned an unexpected HTTP status");
            return Err(ApiError::bad_status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            warn!(method, error = %e, "failed to read API response body");
            ApiError::invalid_response().with_source(e)
        })?;

        debug!(
            method,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API call completed"
        );

        Ok(body)
    }

    /// APIメソッドを呼び出し、検証済みのエンベロープを返す
    pub async fn execute(&self, method: &str, params: Params) -> ApiResult<XmlNode> {
        let body = self.call(method, params).await?;
        envelope::validate(&body)
    }
}
