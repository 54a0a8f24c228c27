use crate::common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, routes};

fn fragment_of(body: &str) -> String {
    let link = body
        .split_whitespace()
        .find(|word| word.contains("/admin/reset-password#"))
        .expect("recovery link in email body");
    link.split_once('#').unwrap().1.to_string()
}

mod session {
    use super::*;

    #[tokio::test]
    async fn logout_ends_the_session() {
        let app = TestApp::spawn().await;
        app.login().await;
        assert_eq!(app.get(routes::ADMIN).await.status, 200);

        let res = app.post_form(routes::LOGOUT, &[]).await;
        res.assert_redirect(routes::LOGIN);

        app.get(routes::ADMIN).await.assert_redirect(routes::LOGIN);
    }

    #[tokio::test]
    async fn login_email_is_case_insensitive() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::LOGIN,
                &[("email", " ADMIN@Example.com "), ("password", ADMIN_PASSWORD)],
            )
            .await;
        res.assert_redirect(routes::ADMIN);
    }
}

mod change_password {
    use super::*;

    #[tokio::test]
    async fn mismatched_or_short_passwords_are_rejected() {
        let app = TestApp::spawn().await;
        app.login().await;

        let res = app
            .post_form(
                routes::CHANGE_PASSWORD,
                &[("password", "abcdef"), ("confirm_password", "abcdeg")],
            )
            .await;
        assert_eq!(res.status, 400);
        assert!(res.text.contains("Passwords do not match"));

        let res = app
            .post_form(
                routes::CHANGE_PASSWORD,
                &[("password", "abc"), ("confirm_password", "abc")],
            )
            .await;
        assert_eq!(res.status, 400);
        assert!(res.text.contains("Password must be at least 6 characters"));
    }

    #[tokio::test]
    async fn new_password_replaces_the_old_one() {
        let app = TestApp::spawn().await;
        app.login().await;

        let res = app
            .post_form(
                routes::CHANGE_PASSWORD,
                &[("password", "brand-new"), ("confirm_password", "brand-new")],
            )
            .await;
        assert_eq!(res.status, 200);
        assert!(res.text.contains("Password updated successfully!"));

        app.post_form(routes::LOGOUT, &[]).await;
        assert_eq!(app.login_with(ADMIN_PASSWORD).await.status, 401);
        app.login_with("brand-new").await.assert_redirect(routes::ADMIN);
    }

    #[tokio::test]
    async fn password_change_ends_other_sessions() {
        let app = TestApp::spawn().await;
        app.login().await;
        let other = app.login_second_client().await;
        assert_eq!(app.get_as(&other, routes::ADMIN).await.status, 200);

        let res = app
            .post_form(
                routes::CHANGE_PASSWORD,
                &[("password", "brand-new"), ("confirm_password", "brand-new")],
            )
            .await;
        assert_eq!(res.status, 200);

        app.get_as(&other, routes::ADMIN)
            .await
            .assert_redirect(routes::LOGIN);
        // The session that made the change is re-signed and stays valid.
        assert_eq!(app.get(routes::ADMIN).await.status, 200);
    }

    #[tokio::test]
    async fn change_password_requires_a_session() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::CHANGE_PASSWORD,
                &[("password", "brand-new"), ("confirm_password", "brand-new")],
            )
            .await;
        res.assert_redirect(routes::LOGIN);
    }
}

mod recovery {
    use super::*;

    #[tokio::test]
    async fn forgot_password_mails_a_link_only_for_known_accounts() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(routes::FORGOT_PASSWORD, &[("email", "nobody@example.com")])
            .await;
        assert_eq!(res.status, 200);
        assert!(res.text.contains("Password reset email sent. Please check your inbox."));
        assert!(app.sent_mail().is_empty());

        let res = app
            .post_form(routes::FORGOT_PASSWORD, &[("email", ADMIN_EMAIL)])
            .await;
        assert_eq!(res.status, 200);
        assert!(res.text.contains("Password reset email sent. Please check your inbox."));

        let mail = app.sent_mail();
        assert_eq!(mail.len(), 1);
        assert_eq!(mail[0].to, ADMIN_EMAIL);
        assert!(fragment_of(&mail[0].body).contains("type=recovery"));
    }

    #[tokio::test]
    async fn recovery_link_allows_setting_a_new_password() {
        let app = TestApp::spawn().await;
        app.post_form(routes::FORGOT_PASSWORD, &[("email", ADMIN_EMAIL)])
            .await;
        let fragment = fragment_of(&app.sent_mail()[0].body);

        let res = app
            .post_form(routes::RECOVERY_SESSION, &[("fragment", fragment.as_str())])
            .await;
        res.assert_redirect(routes::RESET_PASSWORD);

        let page = app.get(routes::RESET_PASSWORD).await;
        assert_eq!(page.status, 200);
        assert!(page.text.contains("confirm_password"));

        let res = app
            .post_form(
                routes::RESET_PASSWORD,
                &[("password", "recovered"), ("confirm_password", "recovered")],
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.text.contains(
            "Your password has been updated successfully. Redirecting to login page..."
        ));
        assert!(res.text.contains("url=/admin/login"));

        // The recovery session ends with the reset.
        app.get(routes::ADMIN).await.assert_redirect(routes::LOGIN);
        app.login_with("recovered").await.assert_redirect(routes::ADMIN);
    }

    #[tokio::test]
    async fn recovery_link_works_only_once() {
        let app = TestApp::spawn().await;
        app.post_form(routes::FORGOT_PASSWORD, &[("email", ADMIN_EMAIL)])
            .await;
        let fragment = fragment_of(&app.sent_mail()[0].body);

        app.post_form(routes::RECOVERY_SESSION, &[("fragment", fragment.as_str())])
            .await
            .assert_redirect(routes::RESET_PASSWORD);
        let res = app
            .post_form(
                routes::RESET_PASSWORD,
                &[("password", "recovered"), ("confirm_password", "recovered")],
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let res = app
            .post_form(routes::RECOVERY_SESSION, &[("fragment", fragment.as_str())])
            .await;
        assert_eq!(res.status, 400);
        assert!(res.text.contains("Recovery link has already been used"));
        app.get(routes::ADMIN).await.assert_redirect(routes::LOGIN);
    }

    #[tokio::test]
    async fn session_from_before_a_reset_is_rejected() {
        let app = TestApp::spawn().await;
        let stale = app.login_second_client().await;

        app.post_form(routes::FORGOT_PASSWORD, &[("email", ADMIN_EMAIL)])
            .await;
        let fragment = fragment_of(&app.sent_mail()[0].body);
        app.post_form(routes::RECOVERY_SESSION, &[("fragment", fragment.as_str())])
            .await
            .assert_redirect(routes::RESET_PASSWORD);

        app.get_as(&stale, routes::ADMIN)
            .await
            .assert_redirect(routes::LOGIN);
    }

    #[tokio::test]
    async fn invalid_recovery_token_reports_session_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::RECOVERY_SESSION,
                &[("fragment", "access_token=garbage&token_type=bearer&type=recovery")],
            )
            .await;
        assert_eq!(res.status, 400);
        assert!(res.text.contains("Error setting session:"));
    }

    #[tokio::test]
    async fn missing_recovery_token_reports_no_session() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(routes::RECOVERY_SESSION, &[("fragment", "type=recovery")])
            .await;
        assert_eq!(res.status, 400);
        assert!(res.text.contains("No valid session found."));

        let page = app.get(routes::RESET_PASSWORD).await;
        assert!(page.text.contains("No valid session found."));
        assert!(!page.text.contains("confirm_password\""));
    }

    #[tokio::test]
    async fn reset_without_session_is_refused() {
        let app = TestApp::spawn().await;

        let res = app
            .post_form(
                routes::RESET_PASSWORD,
                &[("password", "recovered"), ("confirm_password", "recovered")],
            )
            .await;
        assert_eq!(res.status, 401);
        assert!(res.text.contains("No valid session found."));
        app.login_with(ADMIN_PASSWORD).await.assert_redirect(routes::ADMIN);
    }
}
