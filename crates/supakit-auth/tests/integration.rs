//! HTTP-level tests for supakit-auth against a mocked GoTrue server.
//!
//! Run with: cargo test -p supakit-auth

use mockito::{Matcher, Server};
use serde_json::{json, Value as JsonValue};

use supakit_auth::{
    AuthClient, AuthError, AuthErrorCode, ResendParams, ResendType, Session, SignOutScope,
    SupabaseClientAuthExt, UpdateUserParams,
};
use supakit_core::{SupabaseClient, SupabaseConfig};

fn client_for(server: &Server) -> AuthClient {
    let config = SupabaseConfig::new(server.url(), "test-key");
    SupabaseClient::new(config).expect("valid config").auth()
}

fn user_json(confirmed: bool) -> JsonValue {
    json!({
        "id": "3f1c-user",
        "aud": "authenticated",
        "email": "ada@example.com",
        "email_confirmed_at": if confirmed { json!("2024-01-01T00:00:00Z") } else { JsonValue::Null },
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-02T00:00:00Z",
        "user_metadata": {"firstName": "Ada"}
    })
}

fn session_json(access_token: &str) -> JsonValue {
    json!({
        "access_token": access_token,
        "refresh_token": "refresh-1",
        "expires_in": 3600,
        "token_type": "bearer",
        "user": user_json(true)
    })
}

fn expired_session() -> Session {
    let mut session: Session = serde_json::from_value(session_json("old-token")).unwrap();
    session.expires_at = Some(0);
    session
}

// ─── Sign Up ──────────────────────────────────────────────────

#[tokio::test]
async fn sign_up_awaiting_confirmation_returns_bare_user() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/auth/v1/signup")
        .match_header("apikey", "test-key")
        .match_body(Matcher::PartialJson(json!({
            "email": "ada@example.com",
            "password": "hunter22",
            "data": {"firstName": "Ada"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json(false).to_string())
        .create_async()
        .await;

    let auth = client_for(&server);
    let resp = auth
        .sign_up_with_email_and_data(
            "ada@example.com",
            "hunter22",
            Some(json!({"firstName": "Ada"})),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(resp.session.is_none());
    assert!(resp.user.unwrap().email_confirmed_at.is_none());
    assert!(auth.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn sign_up_auto_confirmed_stores_session() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/signup")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_json("fresh-token").to_string())
        .create_async()
        .await;

    let auth = client_for(&server);
    let resp = auth
        .sign_up_with_email_and_data("ada@example.com", "hunter22", None)
        .await
        .unwrap();

    assert!(resp.session.is_some());
    let stored = auth.get_session().await.unwrap().unwrap();
    assert_eq!(stored.access_token, "fresh-token");
}

#[tokio::test]
async fn sign_up_error_carries_message_and_code() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/signup")
        .with_status(422)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .sign_up_with_email_and_data("ada@example.com", "hunter22", None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "User already registered");
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.error_code(), Some(&AuthErrorCode::UserAlreadyExists));
}

// ─── Sign In ──────────────────────────────────────────────────

#[tokio::test]
async fn sign_in_stores_session_shared_across_handles() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_json("signed-in").to_string())
        .create_async()
        .await;

    let config = SupabaseConfig::new(server.url(), "test-key");
    let first = SupabaseClient::new(config.clone()).unwrap();
    let second = SupabaseClient::new(config).unwrap();

    first
        .auth()
        .sign_in_with_password_email("ada@example.com", "hunter22")
        .await
        .unwrap();

    let seen = second.auth().get_session().await.unwrap().unwrap();
    assert_eq!(seen.access_token, "signed-in");
    assert_eq!(second.bearer_token().await, "signed-in");
}

#[tokio::test]
async fn sign_in_bad_credentials() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"invalid_grant","error_description":"Invalid login credentials","error_code":"invalid_credentials"}"#)
        .create_async()
        .await;

    let auth = client_for(&server);
    let err = auth
        .sign_in_with_password_email("ada@example.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid login credentials");
    assert!(auth.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let err = client_for(&server)
        .sign_in_with_password_email("ada@example.com", "x")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 502");
}

// ─── Session refresh ─────────────────────────────────────────

#[tokio::test]
async fn expiring_session_is_refreshed() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()))
        .match_body(Matcher::PartialJson(json!({"refresh_token": "refresh-1"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_json("new-token").to_string())
        .create_async()
        .await;

    let auth = client_for(&server);
    auth.set_session(expired_session()).await.unwrap();

    let session = auth.get_session().await.unwrap().unwrap();
    refresh.assert_async().await;
    assert_eq!(session.access_token, "new-token");
}

#[tokio::test]
async fn failed_refresh_clears_session() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error_code":"refresh_token_not_found","msg":"Invalid Refresh Token"}"#)
        .create_async()
        .await;

    let auth = client_for(&server);
    auth.set_session(expired_session()).await.unwrap();

    let err = auth.get_session().await.unwrap_err();
    assert!(matches!(err, AuthError::Api { status: 400, .. }));
    assert!(auth.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn refresh_disabled_returns_stale_session() {
    let server = Server::new_async().await;
    let config = SupabaseConfig::new(server.url(), "test-key").auto_refresh_token(false);
    let auth = SupabaseClient::new(config).unwrap().auth();
    auth.set_session(expired_session()).await.unwrap();

    let session = auth.get_session().await.unwrap().unwrap();
    assert_eq!(session.access_token, "old-token");
}

// ─── User ─────────────────────────────────────────────────────

#[tokio::test]
async fn current_user_uses_session_token() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/token")
        .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(session_json("tok-1").to_string())
        .create_async()
        .await;
    let get_user = server
        .mock("GET", "/auth/v1/user")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json(true).to_string())
        .create_async()
        .await;

    let auth = client_for(&server);
    auth.sign_in_with_password_email("ada@example.com", "hunter22")
        .await
        .unwrap();
    let user = auth.current_user().await.unwrap().unwrap();

    get_user.assert_async().await;
    assert_eq!(user.id, "3f1c-user");
}

#[tokio::test]
async fn update_user_refreshes_stored_user() {
    let mut server = Server::new_async().await;
    let mut updated = user_json(true);
    updated["user_metadata"] = json!({"firstName": "Grace"});
    server
        .mock("PUT", "/auth/v1/user")
        .match_header("authorization", "Bearer tok-1")
        .match_body(Matcher::Json(json!({"data": {"firstName": "Grace"}})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(updated.to_string())
        .create_async()
        .await;

    let auth = client_for(&server);
    let session: Session = serde_json::from_value(session_json("tok-1")).unwrap();
    auth.set_session(session).await.unwrap();

    auth.update_user("tok-1", UpdateUserParams::data(json!({"firstName": "Grace"})))
        .await
        .unwrap();

    let stored = auth.get_session().await.unwrap().unwrap();
    assert_eq!(
        stored.user.user_metadata.unwrap()["firstName"],
        json!("Grace")
    );
}

// ─── Sign Out ─────────────────────────────────────────────────

#[tokio::test]
async fn sign_out_revokes_and_clears() {
    let mut server = Server::new_async().await;
    let logout = server
        .mock("POST", "/auth/v1/logout")
        .match_query(Matcher::UrlEncoded("scope".into(), "global".into()))
        .match_header("authorization", "Bearer tok-1")
        .with_status(204)
        .create_async()
        .await;

    let auth = client_for(&server);
    let session: Session = serde_json::from_value(session_json("tok-1")).unwrap();
    auth.set_session(session).await.unwrap();

    auth.sign_out().await.unwrap();
    logout.assert_async().await;
    assert!(auth.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn sign_out_treats_missing_server_session_as_success() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/logout")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"msg":"Session not found"}"#)
        .create_async()
        .await;

    let auth = client_for(&server);
    let session: Session = serde_json::from_value(session_json("tok-1")).unwrap();
    auth.set_session(session).await.unwrap();

    auth.sign_out().await.unwrap();
    assert!(auth.get_session().await.unwrap().is_none());
}

#[tokio::test]
async fn sign_out_server_error_keeps_session() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/logout")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"msg":"Database error"}"#)
        .create_async()
        .await;

    let auth = client_for(&server);
    let session: Session = serde_json::from_value(session_json("tok-1")).unwrap();
    auth.set_session(session).await.unwrap();

    let err = auth.sign_out().await.unwrap_err();
    assert_eq!(err.to_string(), "Database error");
    assert!(auth.get_session().await.unwrap().is_some());
}

#[tokio::test]
async fn sign_out_others_keeps_local_session() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/auth/v1/logout")
        .match_query(Matcher::UrlEncoded("scope".into(), "others".into()))
        .with_status(204)
        .create_async()
        .await;

    let auth = client_for(&server);
    let session: Session = serde_json::from_value(session_json("tok-1")).unwrap();
    auth.set_session(session).await.unwrap();

    auth.sign_out_with_scope(SignOutScope::Others).await.unwrap();
    assert!(auth.get_session().await.unwrap().is_some());
}

// ─── Resend ───────────────────────────────────────────────────

#[tokio::test]
async fn resend_posts_type_and_email() {
    let mut server = Server::new_async().await;
    let resend = server
        .mock("POST", "/auth/v1/resend")
        .match_body(Matcher::Json(json!({"type": "signup", "email": "ada@example.com"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    client_for(&server)
        .resend(ResendParams::email("ada@example.com", ResendType::Signup))
        .await
        .unwrap();
    resend.assert_async().await;
}
