use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use authgate::config::Config;
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    // Temp-file database: an in-memory URL would give each pooled
    // connection its own empty database.
    let db_path =
        std::env::temp_dir().join(format!("authgate-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    let state = authgate::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    authgate::api::router(state).await
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_message(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body_json["message"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_signup_login_flow() {
    let app = spawn_app().await;

    // Fresh registration succeeds
    let response = app
        .clone()
        .oneshot(json_post(
            "/signup",
            serde_json::json!({"email": "a@x.com", "password": "p1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_message(response).await, "User registered successfully!");

    // Same email again is rejected
    let response = app
        .clone()
        .oneshot(json_post(
            "/signup",
            serde_json::json!({"email": "a@x.com", "password": "p2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_message(response).await, "Email already exists");

    // Wrong password
    let response = app
        .clone()
        .oneshot(json_post(
            "/login",
            serde_json::json!({"email": "a@x.com", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_message(response).await, "Invalid credentials");

    // Correct password
    let response = app
        .clone()
        .oneshot(json_post(
            "/login",
            serde_json::json!({"email": "a@x.com", "password": "p1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_message(response).await, "Login successful!");
}

#[tokio::test]
async fn test_signup_missing_fields() {
    let app = spawn_app().await;

    for body in [
        serde_json::json!({"password": "p1"}),
        serde_json::json!({"email": "a@x.com"}),
        serde_json::json!({"email": "", "password": "p1"}),
        serde_json::json!({"email": "a@x.com", "password": ""}),
        serde_json::json!({}),
    ] {
        let response = app.clone().oneshot(json_post("/signup", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_message(response).await, "Email and password are required");
    }
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_post("/login", serde_json::json!({"email": "a@x.com"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_message(response).await, "Email and password are required");
}

#[tokio::test]
async fn test_login_unknown_email_is_invalid_credentials() {
    let app = spawn_app().await;

    // Unknown email must be indistinguishable from a wrong password.
    let response = app
        .clone()
        .oneshot(json_post(
            "/login",
            serde_json::json!({"email": "nobody@x.com", "password": "p1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_message(response).await, "Invalid credentials");
}

#[tokio::test]
async fn test_email_is_case_sensitive() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(json_post(
            "/signup",
            serde_json::json!({"email": "Case@X.com", "password": "p1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Lookup is exact-match, so a different casing is a different identity.
    let response = app
        .clone()
        .oneshot(json_post(
            "/login",
            serde_json::json!({"email": "case@x.com", "password": "p1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(json_post(
            "/signup",
            serde_json::json!({"email": "case@x.com", "password": "p2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_health_probes() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/system/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/system/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body_json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body_json["ready"], true);
    assert_eq!(body_json["checks"]["database"], true);
}
