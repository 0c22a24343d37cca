/// プレゼンテーション層: コマンド結果の出力
///
/// コマンド実行結果をユーザー向け（人間可読、stderr）または
/// 機械向け（JSON、stdout）形式で出力する責務を担います。
use crate::commands::result::CommandResult;
use anyhow::Result;
use garagetv::domain::formatter::{format_duration, format_timestamp};
use garagetv::{CollectionRecord, PingOutcome, UserRecord, VideoRecord};
use serde::Serialize;

/// 出力時の表示設定
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// 機械可読出力フラグ
    pub machine: bool,
    /// タイムスタンプ表示に使うオフセット(秒)
    pub timezone_offset_seconds: i32,
}

/// エラー出力用の情報
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    pub error: String,
    pub causes: Vec<String>,
    pub exit_code: i32,
    /// GarageTV のエラーコード（APIエラーの場合）
    pub api_code: Option<i64>,
    pub hint: Option<String>,
}

/// コマンド結果を適切な形式で出力する
///
/// * `machine = false`: 人間向けの詳細メッセージ（stderr）
/// * `machine = true`: 機械可読JSON（stdout）
pub fn output_result(result: &CommandResult, options: OutputOptions) -> Result<()> {
    if options.machine {
        println!("{}", machine_readable(result)?);
    } else {
        output_human_readable(result, options.timezone_offset_seconds);
    }
    Ok(())
}

/// エラーを適切な形式で出力する
pub fn output_error(report: &ErrorReport, machine: bool) {
    if machine {
        let mut json = serde_json::json!({ "success": false });
        if let (Some(object), Ok(serde_json::Value::Object(fields))) =
            (json.as_object_mut(), serde_json::to_value(report))
        {
            object.extend(fields);
        }
        println!("{}", json);
        return;
    }

    eprintln!("Error: {}", report.error);
    if !report.causes.is_empty() {
        eprintln!("\nCaused by:");
        for (i, cause) in report.causes.iter().enumerate() {
            eprintln!("  {}: {}", i + 1, cause);
        }
    }
    if let Some(hint) = &report.hint {
        eprintln!("\nHint: {}", hint);
    }
}

/// 機械可読JSONを生成
///
/// 結果のフィールドに `"success": true` を加える。
fn machine_readable(result: &CommandResult) -> Result<String> {
    let mut json = serde_json::to_value(result)?;
    if let Some(object) = json.as_object_mut() {
        object.insert("success".to_string(), serde_json::Value::Bool(true));
    }
    Ok(serde_json::to_string(&json)?)
}

/// 人間向けの詳細メッセージを出力（stderr）
fn output_human_readable(result: &CommandResult, offset: i32) {
    eprintln!("{}", result.success_message());

    match result {
        CommandResult::Configure(r) => {
            eprintln!("Config file:     {}", r.config_path);
            eprintln!(
                "API key:         {}",
                r.api_key.as_deref().unwrap_or("(not set)")
            );
            eprintln!(
                "User-Agent:      {}",
                r.user_agent.as_deref().unwrap_or("(default)")
            );
            match r.timeout_seconds {
                Some(timeout) => eprintln!("Timeout:         {}s", timeout),
                None => eprintln!("Timeout:         (default)"),
            }
            eprintln!("Timezone offset: {}s", r.timezone_offset_seconds);
        }
        CommandResult::Ping(r) => {
            if matches!(r.outcome, PingOutcome::Unexpected(_)) {
                eprintln!("The server answered, but not with the expected reply.");
            }
        }
        CommandResult::Version(_) => {}
        CommandResult::Login(_) => {
            eprintln!("Your user token has been saved.");
        }
        CommandResult::Logout(r) => {
            if r.was_logged_in && !r.server_logged_off {
                eprintln!("Note: the server could not be notified; the local token was removed.");
            }
        }
        CommandResult::Status(r) => {
            match &r.api_key {
                Some(key) => eprintln!("API key:  {}", key),
                None => eprintln!("API key:  (not set) - run 'garagetv configure --api-key <key>'"),
            }
            match &r.username {
                Some(username) => eprintln!("User:     {}", username),
                None => eprintln!("User:     (not logged in)"),
            }
            if let Some(version) = &r.server_version {
                eprintln!("API:      version {}", version);
            }
            if let Some(error) = &r.server_error {
                eprintln!("API:      {}", error);
            }
        }
        CommandResult::Collections(r) => {
            print_collections(&r.items);
        }
        CommandResult::Videos(r) => {
            if r.videos.is_empty() {
                eprintln!("No videos found.");
            }
            for (idx, video) in r.videos.iter().enumerate() {
                eprintln!();
                eprintln!("--- #{}", idx + 1);
                print_video_summary(video, offset);
            }
        }
        CommandResult::Video(r) => {
            eprintln!();
            print_video_details(&r.video, offset);
        }
        CommandResult::Profile(r) => {
            eprintln!();
            print_user(&r.user, offset);
        }
        CommandResult::Action(_) => {}
    }
}

fn print_collections(items: &[CollectionRecord]) {
    for item in items {
        eprintln!("  [{:>4}] {} ({} videos)", item.id, item.name, item.video_count);
    }
}

fn print_video_summary(video: &VideoRecord, offset: i32) {
    eprintln!("Video ID: {}", video.id.as_deref().unwrap_or("-"));
    if let Some(name) = &video.name {
        eprintln!("Title:    {}", name);
    }
    if let Some(seconds) = video.duration_in_seconds {
        eprintln!("Duration: {}", format_duration(seconds));
    }
    if let Some(owner) = video.user.as_ref().and_then(|u| u.username.as_deref()) {
        eprintln!("By:       {}", owner);
    }
    if let Some(post_date) = video.post_date {
        eprintln!("Posted:   {}", format_timestamp(post_date, offset));
    }
    if let Some(url) = &video.viewer_url {
        eprintln!("URL:      {}", url);
    }
}

fn print_video_details(video: &VideoRecord, offset: i32) {
    print_video_summary(video, offset);
    if let Some(description) = &video.description {
        eprintln!("Description: {}", description);
    }
    if let Some(rating) = video.rating {
        eprintln!("Rating:      {}", rating);
    }
    if let Some(views) = video.views {
        eprintln!("Views:       {}", views);
    }

    let urls = [
        ("Thumbnail", &video.thumbnail_url),
        ("Image", &video.image_url),
        ("FLV", &video.video_url),
        ("TV", &video.tvvideo_url),
        ("MP4", &video.mp4video_url),
    ];
    for (label, url) in urls {
        if let Some(url) = url {
            eprintln!("{:<12} {}", format!("{}:", label), url);
        }
    }
}

fn print_user(user: &UserRecord, offset: i32) {
    eprintln!("User ID:      {}", user.id.as_deref().unwrap_or("-"));
    if let Some(name) = user.display_name.as_ref().or(user.name.as_ref()) {
        eprintln!("Name:         {}", name);
    }
    if let Some(location) = &user.location {
        eprintln!("Location:     {}", location);
    }
    if let Some(country) = &user.country_name {
        eprintln!("Country:      {}", country);
    }
    if let Some(created) = user.date_created {
        eprintln!("Member since: {}", format_timestamp(created, offset));
    }
    if let Some(last_login) = user.last_login {
        eprintln!("Last login:   {}", format_timestamp(last_login, offset));
    }
    if let Some(posts) = user.total_posts {
        eprintln!("Posts:        {}", posts);
    }
    if let Some(friends) = user.total_friends {
        eprintln!("Friends:      {}", friends);
    }
    if user.is_banned == Some(true) {
        match user.banned_until {
            Some(until) => eprintln!("Banned until: {}", format_timestamp(until, offset)),
            None => eprintln!("Banned"),
        }
    }
    if let Some(bio) = &user.bio {
        eprintln!("Bio:          {}", bio);
    }
}
