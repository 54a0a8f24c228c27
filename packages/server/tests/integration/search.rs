use crate::common::{TestApp, routes};

#[tokio::test]
async fn search_requires_a_query() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::SEARCH_API).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(res.body["message"], "Query parameter is required");

    let res = app.get(&format!("{}?q=", routes::SEARCH_API)).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn search_matches_title_slug_and_tags_newest_first() {
    let app = TestApp::spawn().await;
    app.insert_video("Dance Challenge", "dance-challenge", &[], 30).await;
    app.insert_video("Cooking Pasta", "cooking-pasta", &["food"], 20).await;
    app.insert_video("Weekend Vlog", "weekend-vlog", &["DANCE", "fun"], 10).await;

    let res = app.get(&format!("{}?q=dance", routes::SEARCH_API)).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let slugs: Vec<&str> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["weekend-vlog", "dance-challenge"]);

    let res = app.get(&format!("{}?q=PASTA", routes::SEARCH_API)).await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    assert_eq!(res.body[0]["title"], "Cooking Pasta");
    assert_eq!(res.body[0]["tags"][0], "food");
}

#[tokio::test]
async fn search_without_matches_returns_empty_list() {
    let app = TestApp::spawn().await;
    app.insert_video("Dance Challenge", "dance-challenge", &[], 0).await;

    let res = app.get(&format!("{}?q=zzz", routes::SEARCH_API)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, serde_json::json!([]));
}
