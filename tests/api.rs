//! モックサーバーに対するAPIクライアントの結合テスト
use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Redirect;
use axum::routing::get;
use garagetv::{ApiClient, ErrorSeverity, Paging, PingOutcome, UploadOptions};
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// サーバーが受け取ったリクエスト
#[derive(Debug, Clone)]
struct Seen {
    query: String,
    user_agent: Option<String>,
}

#[derive(Clone)]
struct Mock {
    status: StatusCode,
    body: Arc<String>,
    delay: Option<Duration>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Mock {
    fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().expect("no request received")
    }

    /// デコード済みの (名前, 値) を順番どおりに返す
    fn last_params(&self) -> Vec<(String, String)> {
        self.last()
            .query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
                (
                    name.to_string(),
                    urlencoding::decode(value).unwrap().into_owned(),
                )
            })
            .collect()
    }

    fn param(&self, name: &str) -> Option<String> {
        self.last_params()
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    fn param_names(&self) -> Vec<String> {
        self.last_params().into_iter().map(|(n, _)| n).collect()
    }
}

async fn handler(
    State(mock): State<Mock>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> (StatusCode, String) {
    mock.seen.lock().unwrap().push(Seen {
        query: query.unwrap_or_default(),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    if let Some(delay) = mock.delay {
        tokio::time::sleep(delay).await;
    }
    (mock.status, mock.body.as_str().to_string())
}

async fn serve_with(status: StatusCode, body: &str, delay: Option<Duration>) -> (ApiClient, Mock) {
    let mock = Mock {
        status,
        body: Arc::new(body.to_string()),
        delay,
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/api.ashx", get(handler))
        .with_state(mock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::with_base_url("TESTKEY", format!("http://{}/api.ashx", addr)).unwrap();
    (client, mock)
}

async fn serve(body: &str) -> (ApiClient, Mock) {
    serve_with(StatusCode::OK, body, None).await
}

fn success(inner: &str) -> String {
    format!(r#"<?xml version="1.0" encoding="utf-8"?><response type="Success" error="0">{}</response>"#, inner)
}

const VIDEO: &str = r#"<videoinfo>
    <id>1001</id>
    <name>Rally Sprint</name>
    <description>  Gravel stage  </description>
    <duration>3:25</duration>
    <rating>4</rating>
    <postdate>2008-05-14T10:23:00</postdate>
    <views>250</views>
    <userid>7</userid>
    <username>alice</username>
    <viewer>http://www.garagetv.be/v/1001</viewer>
</videoinfo>"#;

// --- transport ---

#[tokio::test]
async fn sends_key_method_and_user_agent() {
    let (mut client, mock) = serve(&success("<answer>1.2</answer>")).await;
    client.set_user_agent("Script/2.0");

    assert_eq!(client.get_version().await.unwrap(), "1.2");

    let seen = mock.last();
    assert_eq!(seen.query, "apikey=TESTKEY&method=GetVersion");
    let user_agent = seen.user_agent.unwrap();
    assert!(user_agent.ends_with(" Script/2.0"), "user agent was {}", user_agent);
    assert!(user_agent.contains(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn http_error_status_becomes_api_error() {
    let (client, _mock) =
        serve_with(StatusCode::INTERNAL_SERVER_ERROR, "oops", None).await;

    let err = client.get_version().await.unwrap_err();
    assert_eq!(err.code(), Some(500));
    assert_eq!(err.message(), "Invalid response-headers (500)");
}

#[tokio::test]
async fn unreachable_server_is_invalid_response() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::with_base_url("K", format!("http://{}/api.ashx", addr)).unwrap();
    let err = client.ping(None).await.unwrap_err();
    assert_eq!(err.code(), Some(1));
    assert!(err.is_invalid_response());
    assert_eq!(err.severity(), ErrorSeverity::SystemError);
}

#[tokio::test]
async fn transport_error_does_not_expose_credentials() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client =
        ApiClient::with_base_url("SECRETKEY", format!("http://{}/api.ashx", addr)).unwrap();
    let err = client.login("alice", "hunter2").await.unwrap_err();
    assert!(err.is_invalid_response());

    let source = err.source().expect("transport error is kept as source").to_string();
    let mut rendered = err.to_string();
    let mut cause = err.source();
    while let Some(current) = cause {
        rendered.push_str(&current.to_string());
        cause = current.source();
    }
    for secret in [&source, &rendered] {
        assert!(!secret.contains("SECRETKEY"), "{}", secret);
        assert!(!secret.contains("hunter2"), "{}", secret);
        assert!(!secret.contains("apikey="), "{}", secret);
    }
}

#[tokio::test]
async fn redirects_are_followed() {
    let (_, mock) = serve(&success("<answer>1.0</answer>")).await;
    let app = Router::new()
        .route("/old", get(|| async { Redirect::temporary("/api.ashx") }))
        .route("/api.ashx", get(handler))
        .with_state(mock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ApiClient::with_base_url("TESTKEY", format!("http://{}/old", addr)).unwrap();
    assert_eq!(client.get_version().await.unwrap(), "1.0");
    assert_eq!(mock.param("method").as_deref(), Some("GetVersion"));
}

#[tokio::test]
async fn timeout_is_invalid_response() {
    let (mut client, _mock) = serve_with(
        StatusCode::OK,
        &success("<answer>Pong!</answer>"),
        Some(Duration::from_secs(3)),
    )
    .await;
    client.set_timeout(1);

    let err = client.ping(None).await.unwrap_err();
    assert_eq!(err.code(), Some(1));
}

#[tokio::test]
async fn garbage_body_is_invalid_response() {
    let (client, _mock) = serve("<html><body>maintenance").await;
    let err = client.get_categories().await.unwrap_err();
    assert_eq!(err.code(), Some(1));
    assert_eq!(err.message(), "API Error. Invalid response.");
}

// --- envelope ---

#[tokio::test]
async fn failure_with_error_code() {
    let (client, _mock) = serve(r#"<response type="Failure" error="E103"/>"#).await;

    let err = client.login("alice", "wrong").await.unwrap_err();
    assert_eq!(err.code(), Some(103));
    assert_eq!(
        err.message(),
        "User Error. The specified username or password is incorrect."
    );
    assert_eq!(err.severity(), ErrorSeverity::UserError);
}

#[tokio::test]
async fn failure_with_message_has_no_code() {
    let (client, _mock) = serve(
        r#"<response type="Failure" error="E13"><message>Unknown video</message></response>"#,
    )
    .await;

    let err = client.get_video("x").await.unwrap_err();
    assert_eq!(err.code(), None);
    assert_eq!(err.message(), "Unknown video");
}

#[tokio::test]
async fn warning_envelope_is_an_error() {
    let (client, _mock) = serve(r#"<response type="Warning" error="W31"/>"#).await;
    let err = client.get_galleries().await.unwrap_err();
    assert_eq!(err.code(), Some(31));
    assert_eq!(err.severity(), ErrorSeverity::ConfigError);
}

#[tokio::test]
async fn unknown_error_code_message() {
    let (client, _mock) = serve(r#"<response type="Failure" error="E999"/>"#).await;
    let err = client.get_videos_today().await.unwrap_err();
    assert_eq!(err.code(), Some(999));
    assert_eq!(err.message(), "API Error. Unknown error code (999).");
}

#[tokio::test]
async fn success_without_expected_element_is_invalid_response() {
    let (client, _mock) = serve(&success("<nothing/>")).await;
    let err = client.get_video("1001").await.unwrap_err();
    assert_eq!(err.code(), Some(1));
}

// --- session ---

#[tokio::test]
async fn ping_outcomes() {
    let (client, mock) = serve(&success("<answer>Pong!</answer>")).await;
    assert_eq!(client.ping(None).await.unwrap(), PingOutcome::Alive);
    assert_eq!(mock.param_names(), vec!["apikey", "method"]);

    let (client, mock) = serve(&success("<answer>hello</answer>")).await;
    assert_eq!(
        client.ping(Some("hello")).await.unwrap(),
        PingOutcome::Echoed("hello".to_string())
    );
    assert_eq!(mock.param("Payload").as_deref(), Some("hello"));

    // 送信前に Latin-1 変換されたペイロードがそのまま返ってくる
    let (client, mock) = serve(&success("<answer>?uro</answer>")).await;
    assert_eq!(
        client.ping(Some("€uro")).await.unwrap(),
        PingOutcome::Echoed("€uro".to_string())
    );
    assert_eq!(mock.param("Payload").as_deref(), Some("?uro"));

    let (client, _mock) = serve(&success("<answer>busy</answer>")).await;
    let outcome = client.ping(Some("hello")).await.unwrap();
    assert_eq!(outcome, PingOutcome::Unexpected("busy".to_string()));
    assert!(!outcome.is_alive());
}

#[tokio::test]
async fn login_and_logoff() {
    let (client, mock) = serve(&success("<usertoken>TOKEN-1</usertoken>")).await;

    let token = client.login("alice", "p&ss word").await.unwrap();
    assert_eq!(token, "TOKEN-1");
    assert_eq!(mock.param("method").as_deref(), Some("LogOnUser"));
    assert_eq!(mock.param_names(), vec!["apikey", "method", "UserName", "Password"]);
    assert_eq!(mock.param("Password").as_deref(), Some("p&ss word"));

    let (client, mock) = serve(&success("")).await;
    client.logoff("TOKEN-1").await.unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("LogOffUser"));
    assert_eq!(mock.param("UserToken").as_deref(), Some("TOKEN-1"));
}

// --- categories / galleries ---

#[tokio::test]
async fn categories_are_listed() {
    let (client, mock) = serve(&success(
        r#"<categories>
            <categoryinfo><id>3</id><name>Rally</name><videocount>12</videocount></categoryinfo>
            <categoryinfo><id>4</id></categoryinfo>
        </categories>"#,
    ))
    .await;

    let categories = client.get_categories().await.unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("FetchCategories"));
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].name, "Rally");
    assert_eq!(categories[0].video_count, 12);
    assert_eq!(categories[1].name, "");
    assert_eq!(categories[1].video_count, 0);
}

#[tokio::test]
async fn empty_category_list_is_invalid_response() {
    let (client, _mock) = serve(&success("<categories/>")).await;
    assert_eq!(client.get_categories().await.unwrap_err().code(), Some(1));
}

#[tokio::test]
async fn category_videos_send_paging_and_adult_flag() {
    let body = success(&format!("<category><videos>{}</videos></category>", VIDEO));
    let (client, mock) = serve(&body).await;

    let videos = client
        .get_category("3", Paging::new(2, 10), true)
        .await
        .unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(
        mock.param_names(),
        vec!["apikey", "method", "CategoryID", "PageIndex", "PageSize", "18plus"]
    );
    assert_eq!(mock.param("PageIndex").as_deref(), Some("2"));
    assert_eq!(mock.param("PageSize").as_deref(), Some("10"));
    assert_eq!(mock.param("18plus").as_deref(), Some("1"));
}

#[tokio::test]
async fn gallery_videos() {
    let body = success(&format!("<gallery><videos>{}</videos></gallery>", VIDEO));
    let (client, mock) = serve(&body).await;

    let videos = client
        .get_gallery("9", Paging::default(), false)
        .await
        .unwrap();
    assert_eq!(videos[0].id.as_deref(), Some("1001"));
    assert_eq!(mock.param("method").as_deref(), Some("FetchGallery"));
    assert_eq!(mock.param("GalleryId").as_deref(), Some("9"));
    assert_eq!(mock.param("PageSize").as_deref(), Some("48"));
    assert_eq!(mock.param("18plus").as_deref(), Some(""));
}

// --- videos ---

#[tokio::test]
async fn video_is_mapped() {
    let (client, mock) = serve(&success(&format!("<video>{}</video>", VIDEO))).await;

    let video = client.get_video("1001").await.unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("FetchVideo"));
    assert_eq!(mock.param("VideoId").as_deref(), Some("1001"));

    assert_eq!(video.name.as_deref(), Some("Rally Sprint"));
    assert_eq!(video.description.as_deref(), Some("Gravel stage"));
    assert_eq!(video.duration_in_seconds, Some(205));
    assert_eq!(video.rating, Some(4));
    assert_eq!(video.post_date, Some(1210760580));
    assert_eq!(video.views, Some(250));
    assert_eq!(
        video.user.as_ref().and_then(|u| u.username.as_deref()),
        Some("alice")
    );
    assert!(video.mp4video_url.is_none());
}

#[tokio::test]
async fn write_operations_send_token() {
    let (client, mock) = serve(&success("")).await;

    client.comment_video("1001", "TOK", "Très bien").await.unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("CommentVideo"));
    assert_eq!(
        mock.param_names(),
        vec!["apikey", "method", "VideoID", "UserToken", "Comment"]
    );
    assert_eq!(mock.param("Comment").as_deref(), Some("Très bien"));

    client.rate_video("1001", "TOK", 5).await.unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("RateVideo"));
    assert_eq!(mock.param("Rating").as_deref(), Some("5"));

    client.delete_video("1001", "TOK").await.unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("DeleteVideo"));
    assert_eq!(mock.param("UserToken").as_deref(), Some("TOK"));
}

#[tokio::test]
async fn video_lists() {
    let body = success(&format!("<videos>{}{}</videos>", VIDEO, VIDEO));
    let (client, mock) = serve(&body).await;

    assert_eq!(client.get_videos_today().await.unwrap().len(), 2);
    assert_eq!(mock.param("method").as_deref(), Some("FetchVideosToday"));

    client
        .get_videos_by_category("3", Paging::default(), false)
        .await
        .unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("FetchVideosByCategory"));
    assert_eq!(mock.param("CategoryID").as_deref(), Some("3"));

    client
        .get_videos_top_rated(30, Paging::top_rated())
        .await
        .unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("FetchVideosTopRated"));
    assert_eq!(mock.param("TimeWindowSizeInDays").as_deref(), Some("30"));
    assert_eq!(mock.param("PageSize").as_deref(), Some("20"));

    client
        .search_videos("rally & drift", Paging::default())
        .await
        .unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("SearchVideos"));
    assert_eq!(mock.param("Keyword").as_deref(), Some("rally & drift"));
}

#[tokio::test]
async fn search_replaces_characters_outside_latin1() {
    let (client, mock) = serve(&success("<videos></videos>")).await;
    let err = client.search_videos("€uro", Paging::default()).await;
    // 空の一覧は不正なレスポンス
    assert_eq!(err.unwrap_err().code(), Some(1));
    assert_eq!(mock.param("Keyword").as_deref(), Some("?uro"));
}

#[tokio::test]
async fn upload_url_sends_options_in_order() {
    let (client, mock) = serve(&success(&format!("<video>{}</video>", VIDEO))).await;

    let options = UploadOptions {
        title: Some("My run".to_string()),
        tags: vec!["rally".to_string(), "gravel".to_string()],
        channels: vec!["main".to_string()],
        publish_at: chrono::NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|d| d.and_hms_opt(17, 5, 0)),
        published: true,
        ..UploadOptions::default()
    };
    let video = client
        .upload_url("TOK", "http://example.com/run.mp4", &options)
        .await
        .unwrap();

    assert_eq!(video.id.as_deref(), Some("1001"));
    assert_eq!(mock.param("method").as_deref(), Some("UploadURL"));
    assert_eq!(
        mock.param_names(),
        vec![
            "apikey", "method", "UserToken", "Title", "Tags", "channels", "date", "URL",
            "published"
        ]
    );
    assert_eq!(mock.param("Tags").as_deref(), Some("rally+gravel"));
    assert_eq!(mock.param("date").as_deref(), Some("20240309-1705"));
    assert_eq!(mock.param("URL").as_deref(), Some("http://example.com/run.mp4"));
    assert_eq!(mock.param("published").as_deref(), Some("1"));
}

#[tokio::test]
async fn upload_url_minimal() {
    let (client, mock) = serve(&success(&format!("<video>{}</video>", VIDEO))).await;
    client
        .upload_url("TOK", "http://example.com/a.flv", &UploadOptions::default())
        .await
        .unwrap();
    assert_eq!(
        mock.param_names(),
        vec!["apikey", "method", "UserToken", "URL"]
    );
}

// --- users ---

#[tokio::test]
async fn user_profiles() {
    let body = success(
        r#"<users><userinfo>
            <id>7</id>
            <name>alice</name>
            <datecreated>2007-01-02 03:04:05</datecreated>
            <isbanned>False</isbanned>
            <totalposts>12</totalposts>
        </userinfo></users>"#,
    );
    let (client, mock) = serve(&body).await;

    let user = client.get_user_profile("7").await.unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("FetchUserProfile"));
    assert_eq!(mock.param("UserID").as_deref(), Some("7"));
    assert_eq!(user.name.as_deref(), Some("alice"));
    assert_eq!(user.date_created, Some(1167707045));
    assert_eq!(user.is_banned, Some(false));
    assert_eq!(user.total_posts, Some(12));

    client.get_user_profile_by_username("alice").await.unwrap();
    assert_eq!(
        mock.param("method").as_deref(),
        Some("FetchUserProfileByUserName")
    );
    assert_eq!(mock.param("Username").as_deref(), Some("alice"));
}

#[tokio::test]
async fn user_video_lists() {
    let body = success(&format!("<user><videos>{}</videos></user>", VIDEO));
    let (client, mock) = serve(&body).await;

    let videos = client
        .get_user_videos("7", "TOK", Paging::default(), false)
        .await
        .unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(
        mock.param_names(),
        vec!["apikey", "method", "UserID", "UserToken", "PageIndex", "PageSize", "18plus"]
    );

    client
        .get_user_videos_by_username("alice", Paging::default(), true)
        .await
        .unwrap();
    assert_eq!(
        mock.param("method").as_deref(),
        Some("FetchUserVideosByUserName")
    );
    assert_eq!(mock.param("UserName").as_deref(), Some("alice"));

    client
        .get_user_favorite_videos("7", "TOK", Paging::default(), false)
        .await
        .unwrap();
    assert_eq!(mock.param("method").as_deref(), Some("FetchUserFavoriteVideos"));
}

#[tokio::test]
async fn user_without_videos_is_empty_list() {
    let (client, _mock) = serve(&success("<user><videos/></user>")).await;
    let videos = client
        .get_user_videos_by_username("bob", Paging::default(), false)
        .await
        .unwrap();
    assert!(videos.is_empty());

    let (client, _mock) = serve(&success("<user/>")).await;
    let err = client
        .get_user_videos_by_username("bob", Paging::default(), false)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(1));
}
