//! 인증 endpoint.
//!
//! 회원가입, 로그인, 로그아웃, 토큰 리프레시를 위한 REST API를 제공합니다.
//! 토큰은 응답 본문과 함께 access_token / refresh_token 쿠키로도 전달됩니다.
//!
//! # 엔드포인트
//!
//! - `POST /auth/signup` - 회원가입
//! - `POST /auth/signin` - 로그인
//! - `POST /auth/logout` - 로그아웃 (쿠키 제거)
//! - `GET /auth/signin/refresh` - 토큰 재발급

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::guard::{ACCESS_COOKIE, REFRESH_COOKIE};
use crate::auth::{
    create_token_pair, hash_password, verify_password, JwtAuth, RefreshAuth, TokenPair,
};
use crate::error::{error_response, ApiErrorResponse, ApiResult};
use crate::metrics::record_signup;
use crate::repository::{NewUser, UserRepository};
use crate::state::AppState;
use shop_core::{Role, User};

// ==================== 요청/응답 타입 ====================

/// 회원가입 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    /// 사용자 이름
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    /// 이메일
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    /// 비밀번호
    pub password: String,
    /// 비밀번호 확인 (선택)
    #[serde(default)]
    pub confirm_password: Option<String>,
    /// 활성 여부 (기본 true)
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// 스태프 여부 (기본 false)
    #[serde(default)]
    pub is_staff: bool,
    /// 역할 (기본 "member")
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_is_active() -> bool {
    true
}

fn default_role() -> String {
    "member".to_string()
}

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    /// 사용자 이름 또는 이메일 (정확 일치)
    pub username_or_email: String,
    /// 비밀번호
    pub password: String,
}

/// 사용자 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            is_active: user.is_active,
            is_staff: user.is_staff,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// 토큰 발급 응답 (로그인/리프레시 공용).
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// 성공 여부
    pub success: bool,
    /// 메시지
    pub message: String,
    /// 발급된 토큰 쌍
    pub token: TokenPair,
}

/// 단순 메시지 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

// ==================== 쿠키 헬퍼 ====================

fn token_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// 토큰 쌍을 쿠키로 설정합니다.
fn set_token_cookies(jar: CookieJar, pair: &TokenPair) -> CookieJar {
    jar.add(token_cookie(ACCESS_COOKIE, pair.access_token.clone()))
        .add(token_cookie(REFRESH_COOKIE, pair.refresh_token.clone()))
}

/// 토큰 쿠키를 모두 제거합니다.
fn clear_token_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(token_cookie(ACCESS_COOKIE, String::new()))
        .remove(token_cookie(REFRESH_COOKIE, String::new()))
}

// ==================== Handler ====================

/// 회원가입.
///
/// POST /auth/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    request.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new("VALIDATION_ERROR", e.to_string())),
        )
    })?;

    if let Some(confirm) = &request.confirm_password {
        if confirm != &request.password {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ApiErrorResponse::new(
                    "PASSWORD_MISMATCH",
                    "Passwords do not match",
                )),
            ));
        }
    }

    let role = Role::parse(&request.role).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(
                "INVALID_ROLE",
                format!("Unknown role: {}", request.role),
            )),
        )
    })?;

    let password_hash = hash_password(&request.password).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new("INVALID_PASSWORD", e.to_string())),
        )
    })?;

    let user = UserRepository::create(
        &state.db,
        NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role,
            is_active: request.is_active,
            is_staff: request.is_staff,
        },
    )
    .await
    .map_err(error_response)?;

    record_signup();
    tracing::info!(user_id = user.id, username = %user.username, "User signed up");

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// 로그인.
///
/// POST /auth/signin
pub async fn signin(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<SignInRequest>,
) -> ApiResult<(CookieJar, Json<TokenResponse>)> {
    let user =
        UserRepository::find_by_username_or_email(&state.db, &request.username_or_email)
            .await
            .map_err(error_response)?
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ApiErrorResponse::new(
                        "INVALID_CREDENTIALS",
                        "Invalid username or email",
                    )),
                )
            })?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiErrorResponse::new(
                "INVALID_CREDENTIALS",
                "Invalid email or password",
            )),
        ));
    }

    let pair = create_token_pair(
        &user.username,
        user.role,
        &state.auth.jwt_secret,
        state.auth.access_token_ttl_minutes,
        state.auth.refresh_token_ttl_days,
    )
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("TOKEN_ERROR", e.to_string())),
        )
    })?;

    let jar = set_token_cookies(jar, &pair);

    Ok((
        jar,
        Json(TokenResponse {
            success: true,
            message: "Successfully logged in".to_string(),
            token: pair,
        }),
    ))
}

/// 로그아웃.
///
/// 서버 측 무효화 목록은 없으며 쿠키 제거만 수행합니다.
/// 만료가 유일한 무효화 수단입니다.
///
/// POST /auth/logout
pub async fn logout(
    JwtAuth(claims): JwtAuth,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    tracing::info!(username = %claims.sub, "User logged out");

    (
        clear_token_cookies(jar),
        Json(MessageResponse {
            success: true,
            message: "Successfully logged out".to_string(),
        }),
    )
}

/// 토큰 재발급.
///
/// Refresh token으로 새 토큰 쌍을 발급합니다. 이때 발급되는 access token의
/// 수명은 로그인 시의 수명(24시간)과 다른 15분입니다.
///
/// GET /auth/signin/refresh
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    RefreshAuth(claims): RefreshAuth,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<TokenResponse>)> {
    let user = UserRepository::find_by_username(&state.db, &claims.sub)
        .await
        .map_err(error_response)?
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiErrorResponse::new(
                    "INVALID_USER",
                    format!("Unknown refresh subject: {}", claims.sub),
                )),
            )
        })?;

    let pair = create_token_pair(
        &user.username,
        user.role,
        &state.auth.jwt_secret,
        state.auth.refreshed_access_ttl_minutes,
        state.auth.refresh_token_ttl_days,
    )
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new("TOKEN_ERROR", e.to_string())),
        )
    })?;

    let jar = set_token_cookies(jar, &pair);

    Ok((
        jar,
        Json(TokenResponse {
            success: true,
            message: "Successfully refreshed token".to_string(),
            token: pair,
        }),
    ))
}

// ==================== 라우터 ====================

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/logout", post(logout))
        .route("/signin/refresh", get(refresh_token))
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn signup_app() -> Router {
        Router::new()
            .route("/auth/signup", post(signup))
            .with_state(Arc::new(create_test_state()))
    }

    async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_signup_password_mismatch_returns_400() {
        let response = post_json(
            signup_app(),
            "/auth/signup",
            serde_json::json!({
                "username": "amir",
                "email": "amir@gmail.com",
                "password": "123456",
                "confirm_password": "654321"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "PASSWORD_MISMATCH");
    }

    #[tokio::test]
    async fn test_signup_unknown_role_returns_400() {
        let response = post_json(
            signup_app(),
            "/auth/signup",
            serde_json::json!({
                "username": "amir",
                "email": "amir@gmail.com",
                "password": "123456",
                "confirm_password": "123456",
                "role": "superuser"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_ROLE");
    }

    #[tokio::test]
    async fn test_signup_invalid_email_returns_400() {
        let response = post_json(
            signup_app(),
            "/auth/signup",
            serde_json::json!({
                "username": "amir",
                "email": "not-an-email",
                "password": "123456"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_logout_requires_token() {
        let app = Router::new()
            .route("/auth/logout", post(logout))
            .with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_signup_request_defaults() {
        let request: SignUpRequest = serde_json::from_str(
            r#"{"username": "amir", "email": "amir@gmail.com", "password": "123456"}"#,
        )
        .unwrap();

        assert!(request.is_active);
        assert!(!request.is_staff);
        assert_eq!(request.role, "member");
        assert!(request.confirm_password.is_none());
    }

    #[test]
    fn test_token_cookies_are_http_only() {
        let cookie = token_cookie(ACCESS_COOKIE, "tok".to_string());
        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_set_and_clear_token_cookies() {
        let pair = TokenPair {
            access_token: "acc".to_string(),
            refresh_token: "ref".to_string(),
            expires_in: 3600,
            token_type: "Bearer".to_string(),
        };

        let jar = set_token_cookies(CookieJar::default(), &pair);
        assert_eq!(jar.get(ACCESS_COOKIE).map(|c| c.value()), Some("acc"));
        assert_eq!(jar.get(REFRESH_COOKIE).map(|c| c.value()), Some("ref"));

        let jar = clear_token_cookies(jar);
        assert!(jar.get(ACCESS_COOKIE).is_none());
        assert!(jar.get(REFRESH_COOKIE).is_none());
    }
}
