use crate::common::{TestApp, routes};

#[tokio::test]
async fn home_shows_default_header_and_latest_videos() {
    let app = TestApp::spawn().await;
    app.insert_video("Older Clip", "older-clip", &[], 10).await;
    app.insert_video("Newer Clip", "newer-clip", &[], 5).await;

    let res = app.get(routes::HOME).await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains("My TikTok Site"));
    assert!(res.text.contains("Welcome!"));

    let newer = res.text.find("Newer Clip").unwrap();
    let older = res.text.find("Older Clip").unwrap();
    assert!(newer < older, "latest videos should be newest first");
    assert!(!res.text.contains("Search results"));
}

#[tokio::test]
async fn home_search_lists_results_with_count() {
    let app = TestApp::spawn().await;
    app.insert_video("Dance Challenge", "dance-challenge", &[], 1).await;
    app.insert_video("Cooking Pasta", "cooking-pasta", &[], 2).await;

    let res = app.get("/?q=dance").await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains("Search results (1)"));

    let res = app.get("/search?q=nothing-here").await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains("Search results (0)"));
}

#[tokio::test]
async fn unknown_video_page_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get(&routes::video("missing")).await;
    assert_eq!(res.status, 404);
    assert!(res.text.contains("Video not found"));
}

#[tokio::test]
async fn video_page_lists_assets_with_download_links() {
    let app = TestApp::spawn().await;
    let video_id = app.insert_video("Clip", "clip", &["dance"], 0).await;
    let asset_id = app.insert_asset(video_id, "beat.mp3", "audio/mpeg").await;

    let res = app.get(&routes::video("clip")).await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains("beat.mp3"));
    assert!(res.text.contains(&routes::download(asset_id)));
    assert!(res.text.contains("Watch on TikTok"));
    assert!(!res.text.contains("Edit Video"));
}

#[tokio::test]
async fn asset_library_filters_by_type() {
    let app = TestApp::spawn().await;
    let video_id = app.insert_video("Clip", "clip", &[], 0).await;
    app.insert_asset(video_id, "beat.mp3", "audio/mpeg").await;
    app.insert_asset(video_id, "still.png", "image/png").await;

    let res = app.get(routes::ASSETS).await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains("beat.mp3"));
    assert!(res.text.contains("still.png"));

    let res = app.get("/assets?type=image/png&sort=download_count").await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains("still.png"));
    assert!(!res.text.contains("beat.mp3"));
}

#[tokio::test]
async fn asset_library_sorts_by_downloads_or_recency() {
    let app = TestApp::spawn().await;
    let video_id = app.insert_video("Clip", "clip", &[], 0).await;
    let popular = app.insert_asset(video_id, "popular.mp3", "audio/mpeg").await;
    app.insert_asset(video_id, "fresh.mp3", "audio/mpeg").await;

    for _ in 0..3 {
        app.get(&routes::download(popular)).await;
    }

    let res = app.get("/assets?sort=download_count").await;
    assert_eq!(res.status, 200);
    let popular_at = res.text.find("popular.mp3").unwrap();
    let fresh_at = res.text.find("fresh.mp3").unwrap();
    assert!(popular_at < fresh_at, "most downloaded first");

    let res = app.get(routes::ASSETS).await;
    let popular_at = res.text.find("popular.mp3").unwrap();
    let fresh_at = res.text.find("fresh.mp3").unwrap();
    assert!(fresh_at < popular_at, "most recent first");
}

#[tokio::test]
async fn contact_form_thanks_the_visitor() {
    let app = TestApp::spawn().await;

    let res = app
        .post_form(
            routes::CONTACT,
            &[
                ("name", "Ann"),
                ("email", "ann@example.com"),
                ("message", "Hello"),
            ],
        )
        .await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains("Thanks for reaching out!"));
}
