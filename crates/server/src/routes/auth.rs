use axum::{
    extract::{OriginalUri, Request, State},
    http::{header::AUTHORIZATION, Method, StatusCode},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use chrono::Utc;

use service::auth::domain::{AuthSession, AuthUser, Claims, LoginInput, RegisterInput};

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "auth",
    request_body = RegisterInput,
    responses(
        (status = 201, description = "Registered", body = AuthUser),
        (status = 400, description = "Bad Request"),
        (status = 409, description = "Conflict")
    )
)]
pub async fn register(
    State(state): State<ServerState>,
    WithRejection(Json(input), _): WithRejection<Json<RegisterInput>, JsonApiError>,
) -> Result<(StatusCode, Json<AuthUser>), JsonApiError> {
    let user = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginInput,
    responses(
        (status = 200, description = "Logged in", body = AuthSession),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    WithRejection(Json(input), _): WithRejection<Json<LoginInput>, JsonApiError>,
) -> Result<(CookieJar, Json<AuthSession>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(session)))
}

pub async fn logout(State(state): State<ServerState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    if let Some(token) = jar.get(AUTH_COOKIE) {
        state.token_cache.invalidate(token.value()).await;
    }
    (jar.remove(Cookie::from(AUTH_COOKIE)), StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = AuthUser),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<ServerState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<AuthUser>, JsonApiError> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| JsonApiError::unauthorized("malformed subject"))?;
    Ok(Json(state.auth.me(user_id).await?))
}

fn is_public(path: &str, method: &Method) -> bool {
    *method == Method::OPTIONS
        || path == "/health"
        || path == "/api/v1/auth/login"
        || path == "/api/v1/auth/register"
        || path.starts_with("/swagger")
}

/// Global middleware: everything except the public routes needs a bearer token,
/// taken from `Authorization` or the `auth_token` cookie.
/// Missing token is 400, invalid or expired is 401. Verified claims land in the
/// request extensions.
pub async fn require_bearer_token_state(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|u| u.0.path().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    if is_public(&path, req.method()) {
        return Ok(next.run(req).await);
    }

    let token = match req.headers().get(AUTHORIZATION) {
        Some(value) => {
            let header = value.to_str().unwrap_or_default();
            match header.strip_prefix("Bearer ") {
                Some(t) if !t.trim().is_empty() => t.trim().to_owned(),
                _ => {
                    tracing::warn!(path = %path, "invalid Authorization format (expect Bearer)");
                    return Err(JsonApiError::unauthorized("expected a Bearer token"));
                }
            }
        }
        None => match CookieJar::from_headers(req.headers()).get(AUTH_COOKIE) {
            Some(c) if !c.value().is_empty() => c.value().to_owned(),
            _ => {
                tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
                return Err(JsonApiError::bad_request("missing bearer token"));
            }
        },
    };

    let claims = match state.token_cache.get(&token).await {
        Some(claims) if claims.exp > Utc::now().timestamp() => claims,
        _ => {
            let claims = state.auth.keys().verify(&token).map_err(|e| {
                tracing::error!(path = %path, err = %e, "token validation failed");
                JsonApiError::unauthorized("invalid or expired token")
            })?;
            state.token_cache.insert(token, claims.clone()).await;
            claims
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
