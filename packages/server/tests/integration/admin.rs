use reqwest::multipart::{Form, Part};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use clipshelf_server::entity::{asset, comment, download_log, video};

use crate::common::{TestApp, png_bytes, routes, video_form};

async fn video_by_slug(app: &TestApp, slug: &str) -> Option<video::Model> {
    video::Entity::find()
        .filter(video::Column::Slug.eq(slug))
        .one(&app.db)
        .await
        .unwrap()
}

mod gating {
    use super::*;

    #[tokio::test]
    async fn admin_pages_redirect_anonymous_visitors_to_login() {
        let app = TestApp::spawn().await;

        for path in [routes::ADMIN, routes::ADMIN_VIDEOS, routes::SETTINGS] {
            let res = app.get(path).await;
            res.assert_redirect(routes::LOGIN);
        }

        let res = app
            .post_multipart(routes::ADMIN_VIDEOS, video_form("Sneaky", "", ""))
            .await;
        res.assert_redirect(routes::LOGIN);
        assert!(video_by_slug(&app, "sneaky").await.is_none());
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.login_with("wrong-password").await;
        assert_eq!(res.status, 401);
        assert!(res.text.contains("Invalid login credentials"));

        let res = app.get(routes::ADMIN).await;
        res.assert_redirect(routes::LOGIN);
    }

    #[tokio::test]
    async fn dashboard_shows_counts_after_login() {
        let app = TestApp::spawn().await;
        let video_id = app.insert_video("Clip", "clip", &[], 0).await;
        let asset_id = app.insert_asset(video_id, "beat.mp3", "audio/mpeg").await;
        app.get(&routes::download(asset_id)).await;
        app.login().await;

        let res = app.get(routes::ADMIN).await;
        assert_eq!(res.status, 200);
        assert!(res.text.contains("Dashboard"));
        assert!(res.text.contains("admin@example.com"));
        assert!(res.text.contains("beat.mp3"));

        let res = app.get(routes::LOGIN).await;
        res.assert_redirect(routes::ADMIN);
    }
}

mod videos {
    use super::*;

    #[tokio::test]
    async fn created_video_gets_slug_from_title() {
        let app = TestApp::spawn().await;
        app.login().await;

        let res = app
            .post_multipart(
                routes::ADMIN_VIDEOS,
                video_form("My First Clip!", "", "dance, fun"),
            )
            .await;
        res.assert_redirect(routes::ADMIN_VIDEOS);

        let stored = video_by_slug(&app, "my-first-clip").await.unwrap();
        assert_eq!(stored.title, "My First Clip!");
        assert_eq!(stored.tags.0, vec!["dance", "fun"]);

        let page = app.get(&routes::video("my-first-clip")).await;
        assert_eq!(page.status, 200);
        assert!(page.text.contains("My First Clip!"));
        assert!(page.text.contains("Edit Video"));
    }

    #[tokio::test]
    async fn duplicate_slug_is_reported() {
        let app = TestApp::spawn().await;
        app.login().await;

        let first = app
            .post_multipart(routes::ADMIN_VIDEOS, video_form("Clip", "same-slug", ""))
            .await;
        first.assert_redirect(routes::ADMIN_VIDEOS);

        let second = app
            .post_multipart(routes::ADMIN_VIDEOS, video_form("Other", "same-slug", ""))
            .await;
        assert_eq!(second.status, 400);
        assert!(second.text.contains("Slug is already in use"));
    }

    #[tokio::test]
    async fn missing_title_is_rejected() {
        let app = TestApp::spawn().await;
        app.login().await;

        let res = app
            .post_multipart(routes::ADMIN_VIDEOS, video_form("  ", "", ""))
            .await;
        assert_eq!(res.status, 400);
        assert!(res.text.contains("Title is required"));
    }

    #[tokio::test]
    async fn cover_image_is_stored_and_served() {
        let app = TestApp::spawn().await;
        app.login().await;

        let form = video_form("With Cover", "", "").part(
            "cover_image",
            Part::bytes(png_bytes()).file_name("cover.png"),
        );
        let res = app.post_multipart(routes::ADMIN_VIDEOS, form).await;
        res.assert_redirect(routes::ADMIN_VIDEOS);

        let stored = video_by_slug(&app, "with-cover").await.unwrap();
        let cover = stored.cover_image_url.unwrap();
        assert!(cover.starts_with(&app.url("/blobs/cover-")), "{cover}");

        let blob = app.client.get(&cover).send().await.unwrap();
        assert_eq!(blob.status().as_u16(), 200);
        assert_eq!(blob.bytes().await.unwrap().to_vec(), png_bytes());
    }

    #[tokio::test]
    async fn update_changes_fields_and_keeps_cover() {
        let app = TestApp::spawn().await;
        app.login().await;
        let id = app.insert_video("Old Title", "old-title", &["a"], 0).await;

        let edit = app.get(&routes::edit_video(id)).await;
        assert_eq!(edit.status, 200);
        assert!(edit.text.contains("Old Title"));

        let res = app
            .post_multipart(
                &routes::update_video(id),
                video_form("New Title", "new-title", "b, c"),
            )
            .await;
        res.assert_redirect(routes::ADMIN_VIDEOS);

        let stored = video::Entity::find_by_id(id).one(&app.db).await.unwrap().unwrap();
        assert_eq!(stored.title, "New Title");
        assert_eq!(stored.slug, "new-title");
        assert_eq!(stored.tags.0, vec!["b", "c"]);
        assert_eq!(stored.cover_image_url, None);

        assert_eq!(app.get(&routes::video("old-title")).await.status, 404);
        assert_eq!(app.get(&routes::video("new-title")).await.status, 200);
    }

    #[tokio::test]
    async fn delete_removes_assets_comments_and_download_logs() {
        let app = TestApp::spawn().await;
        let id = app.insert_video("Doomed", "doomed", &[], 0).await;
        let asset_id = app.insert_asset(id, "beat.mp3", "audio/mpeg").await;
        app.get(&routes::download(asset_id)).await;
        app.post_form(
            &routes::comments("doomed"),
            &[("name", "Ann"), ("email", "ann@example.com"), ("content", "Bye")],
        )
        .await;
        app.login().await;

        let res = app.post_form(&routes::delete_video(id), &[]).await;
        res.assert_redirect(routes::ADMIN_VIDEOS);

        assert!(video_by_slug(&app, "doomed").await.is_none());
        assert_eq!(asset::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(comment::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(download_log::Entity::find().count(&app.db).await.unwrap(), 0);

        let again = app.post_form(&routes::delete_video(id), &[]).await;
        assert_eq!(again.status, 404);
    }
}

mod assets {
    use super::*;

    #[tokio::test]
    async fn uploaded_asset_is_attached_to_the_video() {
        let app = TestApp::spawn().await;
        app.login().await;
        let id = app.insert_video("Clip", "clip", &[], 0).await;

        let form = Form::new()
            .text("name", "Thumbnail")
            .part("file", Part::bytes(png_bytes()).file_name("thumb.png"));
        let res = app.post_multipart(&routes::video_assets(id), form).await;
        res.assert_redirect(&routes::edit_video(id));

        let stored = asset::Entity::find()
            .filter(asset::Column::VideoId.eq(id))
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Thumbnail");
        assert_eq!(stored.mime_type, "image/png");
        assert_eq!(stored.download_count, 0);
        assert!(stored.blob_url.starts_with(&app.url("/blobs/thumb-")));

        let edit = app.get(&routes::edit_video(id)).await;
        assert!(edit.text.contains("Thumbnail"));
    }

    #[tokio::test]
    async fn asset_upload_without_file_is_rejected() {
        let app = TestApp::spawn().await;
        app.login().await;
        let id = app.insert_video("Clip", "clip", &[], 0).await;

        let form = Form::new()
            .text("name", "Nothing")
            .part("file", Part::bytes(Vec::new()).file_name(""));
        let res = app.post_multipart(&routes::video_assets(id), form).await;
        assert_eq!(res.status, 400);
        assert!(res.text.contains("Please select a file to upload."));
        assert_eq!(asset::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_asset_removes_it_and_its_logs() {
        let app = TestApp::spawn().await;
        let id = app.insert_video("Clip", "clip", &[], 0).await;
        let asset_id = app.insert_asset(id, "beat.mp3", "audio/mpeg").await;
        app.get(&routes::download(asset_id)).await;
        app.login().await;

        let other = app.insert_video("Other", "other", &[], 0).await;
        let res = app.post_form(&routes::delete_asset(other, asset_id), &[]).await;
        assert_eq!(res.status, 404);

        let res = app.post_form(&routes::delete_asset(id, asset_id), &[]).await;
        res.assert_redirect(&routes::edit_video(id));
        assert_eq!(asset::Entity::find().count(&app.db).await.unwrap(), 0);
        assert_eq!(download_log::Entity::find().count(&app.db).await.unwrap(), 0);
    }
}

mod settings {
    use super::*;

    #[tokio::test]
    async fn updated_settings_show_on_public_pages() {
        let app = TestApp::spawn().await;
        app.login().await;

        let form = Form::new()
            .text("site_title", "Clip Corner")
            .text("site_subtitle", "Fresh clips daily");
        let res = app.post_multipart(routes::SETTINGS, form).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.text.contains("Settings updated successfully!"));

        let home = app.get(routes::HOME).await;
        assert!(home.text.contains("Clip Corner"));
        assert!(home.text.contains("Fresh clips daily"));
        assert!(!home.text.contains("My TikTok Site"));
    }

    #[tokio::test]
    async fn blank_site_title_is_rejected() {
        let app = TestApp::spawn().await;
        app.login().await;

        let form = Form::new()
            .text("site_title", " ")
            .text("site_subtitle", "Sub");
        let res = app.post_multipart(routes::SETTINGS, form).await;
        assert_eq!(res.status, 400);
        assert!(res.text.contains("Site title is required"));
    }
}
