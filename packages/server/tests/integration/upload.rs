use serde_json::json;

use crate::common::{TestApp, TestResponse, png_bytes, routes};

async fn request_token(app: &TestApp, pathname: &str, content_type: Option<&str>) -> TestResponse {
    let mut body = json!({"type": "blob.generate-client-token", "pathname": pathname});
    if let Some(ct) = content_type {
        body["content_type"] = json!(ct);
    }
    app.post_json(routes::UPLOAD_API, &body).await
}

#[tokio::test]
async fn token_requires_admin_session() {
    let app = TestApp::spawn().await;

    let res = request_token(&app, "cover.png", Some("image/png")).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "UPLOAD_DENIED");
    assert_eq!(res.body["message"], "Not authenticated");
}

#[tokio::test]
async fn disallowed_content_type_is_denied() {
    let app = TestApp::spawn().await;
    app.login().await;

    let res = request_token(&app, "tool.exe", Some("application/x-msdownload")).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "UPLOAD_DENIED");

    let res = request_token(&app, "../etc/passwd", Some("text/plain")).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "UPLOAD_DENIED");
}

#[tokio::test]
async fn brokered_upload_round_trip() {
    let app = TestApp::spawn().await;
    app.login().await;

    let res = request_token(&app, "cover.png", None).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["type"], "blob.generate-client-token");
    assert_eq!(res.body["content_type"], "image/png");

    let pathname = res.body["pathname"].as_str().unwrap().to_string();
    assert!(pathname.starts_with("cover-"));
    assert!(pathname.ends_with(".png"));
    let upload_url = res.body["upload_url"].as_str().unwrap().to_string();
    let public_url = res.body["url"].as_str().unwrap().to_string();
    let client_token = res.body["client_token"].as_str().unwrap().to_string();

    let put = app
        .client
        .put(&upload_url)
        .header("Content-Type", "image/png")
        .body(png_bytes())
        .send()
        .await
        .unwrap();
    let put = TestResponse::from_response(put).await;
    assert_eq!(put.status, 201, "{}", put.text);
    assert_eq!(put.body["size"], png_bytes().len());

    // Keys are write-once.
    let again = app
        .client
        .put(&upload_url)
        .header("Content-Type", "image/png")
        .body(png_bytes())
        .send()
        .await
        .unwrap();
    assert_eq!(again.status().as_u16(), 409);

    let blob = app.client.get(&public_url).send().await.unwrap();
    assert_eq!(blob.status().as_u16(), 200);
    assert_eq!(blob.headers()["content-type"], "image/png");
    assert_eq!(blob.bytes().await.unwrap().to_vec(), png_bytes());

    let done = app
        .post_json(
            routes::UPLOAD_API,
            &json!({
                "type": "blob.upload-completed",
                "pathname": pathname,
                "client_token": client_token,
            }),
        )
        .await;
    assert_eq!(done.status, 200, "{}", done.text);
    assert_eq!(done.body["response"], "ok");
}

#[tokio::test]
async fn blob_put_rejects_bad_tokens() {
    let app = TestApp::spawn().await;
    app.login().await;

    let res = request_token(&app, "notes.txt", Some("text/plain")).await;
    let pathname = res.body["pathname"].as_str().unwrap().to_string();
    let token = res.body["client_token"].as_str().unwrap().to_string();

    let no_token = app
        .client
        .put(app.url(&format!("/blobs/{pathname}")))
        .header("Content-Type", "text/plain")
        .body("hello")
        .send()
        .await
        .unwrap();
    assert_eq!(no_token.status().as_u16(), 401);

    let other_key = app
        .client
        .put(app.url(&format!("/blobs/other.txt?token={token}")))
        .header("Content-Type", "text/plain")
        .body("hello")
        .send()
        .await
        .unwrap();
    assert_eq!(other_key.status().as_u16(), 401);

    let wrong_type = app
        .client
        .put(app.url(&format!("/blobs/{pathname}?token={token}")))
        .header("Content-Type", "image/png")
        .body("hello")
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_type.status().as_u16(), 400);

    let completed = app
        .post_json(
            routes::UPLOAD_API,
            &json!({
                "type": "blob.upload-completed",
                "pathname": "other.txt",
                "client_token": token,
            }),
        )
        .await;
    assert_eq!(completed.status, 400);
    assert_eq!(completed.body["code"], "UPLOAD_DENIED");
}

#[tokio::test]
async fn oversized_blob_put_is_rejected() {
    let app = TestApp::spawn_with(&[("storage.max_blob_size", "16")]).await;
    app.login().await;

    let res = request_token(&app, "big.txt", Some("text/plain")).await;
    assert_eq!(res.status, 200, "{}", res.text);
    let upload_url = res.body["upload_url"].as_str().unwrap().to_string();
    let public_url = res.body["url"].as_str().unwrap().to_string();

    let put = app
        .client
        .put(&upload_url)
        .header("Content-Type", "text/plain")
        .body("x".repeat(64))
        .send()
        .await
        .unwrap();
    let put = TestResponse::from_response(put).await;
    assert_eq!(put.status, 400, "{}", put.text);
    assert_eq!(put.body["code"], "VALIDATION_ERROR");
    assert!(put.body["message"].as_str().unwrap().contains("16 bytes"));

    let blob = app.client.get(&public_url).send().await.unwrap();
    assert_eq!(blob.status().as_u16(), 404);

    let small = app
        .client
        .put(&upload_url)
        .header("Content-Type", "text/plain")
        .body("x".repeat(16))
        .send()
        .await
        .unwrap();
    assert_eq!(small.status().as_u16(), 201);
}

#[tokio::test]
async fn missing_blob_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get("/blobs/nothing-here.png").await;
    assert_eq!(res.status, 404);
}
