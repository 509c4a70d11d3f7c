use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use configs::{AppConfig, SeedAdminConfig};
use server::startup::{build_app, build_state};

const ADMIN_PASSWORD: &str = "Adm1n!pass";

async fn app() -> anyhow::Result<Router> {
    let mut cfg = AppConfig::default();
    cfg.database.url = "sqlite::memory:".into();
    cfg.jwt.secret = "api-flow-secret".into();
    cfg.identity.seed_admin = Some(SeedAdminConfig {
        user_name: "admin".into(),
        email: "admin@example.com".into(),
        password: ADMIN_PASSWORD.into(),
    });
    let state = build_state(&cfg).await?;
    Ok(build_app(state, &cfg))
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => req.header(header::CONTENT_TYPE, "application/json").body(Body::from(v.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn login(app: &Router, user_name: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "user_name": user_name, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().unwrap().to_owned()
}

async fn register_customer(app: &Router, user_name: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "user_name": user_name,
            "email": format!("{user_name}@example.com"),
            "full_name": "Casey Customer",
            "password": "Passw0rd!",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn token_required_outside_public_routes() -> anyhow::Result<()> {
    let app = app().await?;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/api/v1/building", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::GET, "/api/v1/building", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/api/v1/building")
        .header(header::AUTHORIZATION, "Basic abc")
        .body(Body::empty())?;
    assert_eq!(app.clone().oneshot(req).await?.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn register_login_and_cookie_auth() -> anyhow::Result<()> {
    let app = app().await?;
    let user = register_customer(&app, "casey").await;
    assert_eq!(user["role"], "Customer");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "user_name": "casey", "email": "other@example.com", "full_name": "C", "password": "Passw0rd!" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "user_name": "casey", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "user_name": "casey", "password": "Passw0rd!" }).to_string()))?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str()?.to_owned();
    assert!(set_cookie.starts_with("auth_token="));
    let cookie = set_cookie.split(';').next().unwrap_or_default().to_owned();

    let req = Request::builder()
        .uri("/api/v1/auth/me")
        .header(header::COOKIE, cookie)
        .body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let me: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await?)?;
    assert_eq!(me["user_name"], "casey");
    assert_eq!(me["id"], user["id"]);
    Ok(())
}

#[tokio::test]
async fn role_policies_and_crud_flow() -> anyhow::Result<()> {
    let app = app().await?;
    let customer = register_customer(&app, "dana").await;
    let customer_token = login(&app, "dana", "Passw0rd!").await;
    let admin_token = login(&app, "admin", ADMIN_PASSWORD).await;

    let building = json!({ "name": "North Hall", "address": "1 Campus Rd" });
    let (status, _) = send(&app, Method::POST, "/api/v1/building", Some(&customer_token), Some(building.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(&app, Method::POST, "/api/v1/building", Some(&admin_token), Some(building)).await;
    assert_eq!(status, StatusCode::CREATED);
    let building_id = created["id"].as_str().unwrap().to_owned();

    let (status, list) = send(&app, Method::GET, "/api/v1/building", Some(&customer_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/customer",
        Some(&customer_token),
        Some(json!({ "building_id": building_id, "application_user_id": customer["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/v1/building/{building_id}");
    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&admin_token),
        Some(json!({ "name": "North Hall B", "address": "1 Campus Rd", "description": "renovated" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["affected"], 1);

    let (status, fetched) = send(&app, Method::GET, &uri, Some(&customer_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "North Hall B");

    let (status, page) =
        send(&app, Method::GET, "/api/v1/building/paginated?page=1&size=5&order_by=name", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_count"], 1);
    assert_eq!(page["page_number"], 1);

    let (status, _) =
        send(&app, Method::GET, "/api/v1/building/paginated?order_by=nope", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = format!("/api/v1/wallet/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, Method::GET, &missing, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &missing, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/customer/00000000-0000-0000-0000-000000000000", Some(&customer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn swagger_served_in_development() -> anyhow::Result<()> {
    let app = app().await?;
    let (status, doc) = send(&app, Method::GET, "/swagger/v1/swagger.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/order/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn malformed_inputs_get_json_400() -> anyhow::Result<()> {
    let app = app().await?;
    let admin_token = login(&app, "admin", ADMIN_PASSWORD).await;

    let trip = json!({
        "trip_collect": true,
        "trip_type": "Flying",
        "staff_id": uuid::Uuid::new_v4(),
        "building_id": uuid::Uuid::new_v4(),
        "time_schedule_id": uuid::Uuid::new_v4(),
    });
    let (status, body) = send(&app, Method::POST, "/api/v1/staff-trip", Some(&admin_token), Some(trip)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
    assert!(body["detail"].as_str().is_some_and(|d| d.contains("trip_type")), "{body}");

    let (status, body) = send(&app, Method::GET, "/api/v1/building/not-a-uuid", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) =
        send(&app, Method::GET, "/api/v1/building/paginated?size=-1", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({ "user_name": "erin", "password": "Passw0rd!" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    Ok(())
}
