//! Axum용 JWT 인증 추출기 및 권한 검사.
//!
//! 토큰은 `Authorization: Bearer` 헤더 또는 쿠키(access_token /
//! refresh_token)에서 읽습니다. 역할 검사는 토큰이 아닌 데이터베이스의
//! 사용자 레코드를 기준으로 합니다.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use shop_core::{ShopError, User};
use sqlx::PgPool;

use super::jwt::{decode_access_token, decode_refresh_token, Claims, JwtError, RefreshClaims};
use crate::error::ApiErrorResponse;
use crate::repository::UserRepository;

/// Access token 쿠키 이름.
pub const ACCESS_COOKIE: &str = "access_token";
/// Refresh token 쿠키 이름.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// JWT 인증 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtAuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
}

impl IntoResponse for JwtAuthError {
    fn into_response(self) -> Response {
        let code = match &self {
            JwtAuthError::MissingToken => "MISSING_TOKEN",
            JwtAuthError::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            JwtAuthError::TokenExpired => "TOKEN_EXPIRED",
            JwtAuthError::InvalidToken => "INVALID_TOKEN",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorResponse::new(code, self.to_string())),
        )
            .into_response()
    }
}

impl From<JwtError> for JwtAuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => JwtAuthError::TokenExpired,
            _ => JwtAuthError::InvalidToken,
        }
    }
}

/// JWT 비밀 키 저장소.
///
/// 라우터 구성 시 Extension 레이어로 주입되어 추출기에서 사용됩니다.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
}

fn resolve_secret(parts: &Parts) -> String {
    parts
        .extensions
        .get::<JwtConfig>()
        .map(|c| c.secret.clone())
        .unwrap_or_else(|| {
            std::env::var("JWT_SECRET_KEY")
                .unwrap_or_else(|_| shop_core::INSECURE_DEFAULT_SECRET.to_string())
        })
}

/// Bearer 헤더 우선, 없으면 지정한 쿠키에서 토큰을 추출합니다.
fn extract_token(parts: &Parts, cookie_name: &str) -> Result<String, JwtAuthError> {
    if let Some(header) = parts.headers.get(AUTHORIZATION) {
        let value = header
            .to_str()
            .map_err(|_| JwtAuthError::InvalidAuthHeader)?;
        let token = value
            .strip_prefix("Bearer ")
            .ok_or(JwtAuthError::InvalidAuthHeader)?;
        return Ok(token.to_string());
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(cookie_name)
        .map(|c| c.value().to_string())
        .ok_or(JwtAuthError::MissingToken)
}

/// JWT Access Token 인증 추출기.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(JwtAuth(claims): JwtAuth) -> impl IntoResponse {
///     format!("Authenticated user: {}", claims.sub)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts, ACCESS_COOKIE)?;
        let secret = resolve_secret(parts);

        let token_data = decode_access_token(&token, &secret)?;

        Ok(JwtAuth(token_data.claims))
    }
}

/// JWT Refresh Token 인증 추출기.
///
/// `/auth/signin/refresh`에서만 사용됩니다.
#[derive(Debug, Clone)]
pub struct RefreshAuth(pub RefreshClaims);

impl<S> FromRequestParts<S> for RefreshAuth
where
    S: Send + Sync,
{
    type Rejection = JwtAuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts, REFRESH_COOKIE)?;
        let secret = resolve_secret(parts);

        let token_data = decode_refresh_token(&token, &secret)?;

        Ok(RefreshAuth(token_data.claims))
    }
}

/// 토큰 subject를 사용자 레코드로 해석합니다.
///
/// 토큰은 유효하지만 계정이 더 이상 존재하지 않으면 인증 에러(401)입니다.
pub async fn current_user(pool: &PgPool, claims: &Claims) -> Result<User, ShopError> {
    UserRepository::find_by_username(pool, &claims.sub)
        .await?
        .ok_or_else(|| ShopError::Auth(format!("unknown subject: {}", claims.sub)))
}

/// 관리자 권한을 요구합니다.
///
/// 역할은 토큰 클레임이 아니라 조회된 사용자 레코드에서 읽습니다.
/// 토큰 발급 이후 역할이 변경된 경우에도 현재 역할이 적용됩니다.
pub async fn require_admin(pool: &PgPool, claims: &Claims) -> Result<User, ShopError> {
    let user = current_user(pool, claims).await?;

    if !user.is_admin() {
        return Err(ShopError::Permission(format!(
            "admin role required, user {} has role {}",
            user.username, user.role
        )));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_token_pair;
    use axum::http::Request;
    use shop_core::Role;

    const TEST_SECRET: &str = "guard-test-secret-key-minimum-32-chars!!";

    fn parts_with_secret(builder: axum::http::request::Builder) -> Parts {
        let request = builder.body(()).unwrap();
        let (mut parts, _) = request.into_parts();
        parts.extensions.insert(JwtConfig {
            secret: TEST_SECRET.to_string(),
        });
        parts
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let mut parts = parts_with_secret(Request::builder().uri("/order/all"));

        let result = JwtAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(JwtAuthError::MissingToken)));
    }

    #[tokio::test]
    async fn test_bearer_token_accepted() {
        let pair = create_token_pair("amir", Role::Member, TEST_SECRET, 60, 30).unwrap();
        let mut parts = parts_with_secret(
            Request::builder()
                .uri("/order/all")
                .header(AUTHORIZATION, format!("Bearer {}", pair.access_token)),
        );

        let JwtAuth(claims) = JwtAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(claims.sub, "amir");
        assert_eq!(claims.role, Role::Member);
    }

    #[tokio::test]
    async fn test_cookie_token_accepted() {
        let pair = create_token_pair("amir", Role::Member, TEST_SECRET, 60, 30).unwrap();
        let mut parts = parts_with_secret(Request::builder().uri("/order/all").header(
            axum::http::header::COOKIE,
            format!("{}={}", ACCESS_COOKIE, pair.access_token),
        ));

        let JwtAuth(claims) = JwtAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(claims.sub, "amir");
    }

    #[tokio::test]
    async fn test_malformed_bearer_header_rejected() {
        let mut parts = parts_with_secret(
            Request::builder()
                .uri("/order/all")
                .header(AUTHORIZATION, "Token abc"),
        );

        let result = JwtAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(JwtAuthError::InvalidAuthHeader)));
    }

    #[tokio::test]
    async fn test_refresh_token_not_accepted_as_access() {
        let pair = create_token_pair("amir", Role::Member, TEST_SECRET, 60, 30).unwrap();
        let mut parts = parts_with_secret(
            Request::builder()
                .uri("/order/all")
                .header(AUTHORIZATION, format!("Bearer {}", pair.refresh_token)),
        );

        let result = JwtAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(JwtAuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_refresh_extractor_reads_refresh_cookie() {
        let pair = create_token_pair("amir", Role::Member, TEST_SECRET, 60, 30).unwrap();
        let mut parts = parts_with_secret(Request::builder().uri("/auth/signin/refresh").header(
            axum::http::header::COOKIE,
            format!("{}={}", REFRESH_COOKIE, pair.refresh_token),
        ));

        let RefreshAuth(claims) = RefreshAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(claims.sub, "amir");
        assert_eq!(claims.token_type, "refresh");
    }

    #[test]
    fn test_auth_errors_respond_401() {
        let errors = [
            JwtAuthError::MissingToken,
            JwtAuthError::InvalidAuthHeader,
            JwtAuthError::TokenExpired,
            JwtAuthError::InvalidToken,
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
