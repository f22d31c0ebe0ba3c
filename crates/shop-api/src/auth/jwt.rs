//! JWT 토큰 처리.
//!
//! Access Token 및 Refresh Token 생성/검증 로직.
//! 두 토큰 모두 `token_type` 클레임을 가지며, 검증 시 종류가 일치하지
//! 않으면 거부됩니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use shop_core::Role;

const ACCESS_TOKEN_TYPE: &str = "access";
const REFRESH_TOKEN_TYPE: &str = "refresh";

/// JWT Access Token 페이로드.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 이름
    pub sub: String,
    /// 사용자 역할
    pub role: Role,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// JWT ID - 토큰 고유 식별자
    pub jti: String,
    /// Token type - 항상 "access"
    pub token_type: String,
}

impl Claims {
    /// 새로운 Access Claims 생성.
    ///
    /// # Arguments
    ///
    /// * `username` - 사용자 이름 (subject)
    /// * `role` - 사용자 역할
    /// * `expires_in_minutes` - 만료 시간 (분)
    pub fn new(username: impl Into<String>, role: Role, expires_in_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: username.into(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(expires_in_minutes)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        }
    }
}

/// Refresh Token 페이로드.
///
/// Access Token 재발급에만 사용됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    /// Subject - 사용자 이름
    pub sub: String,
    /// Issued At
    pub iat: i64,
    /// Expiration
    pub exp: i64,
    /// JWT ID
    pub jti: String,
    /// Token type - 항상 "refresh"
    pub token_type: String,
}

impl RefreshClaims {
    /// 새로운 Refresh Claims 생성.
    pub fn new(username: impl Into<String>, expires_in_days: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: username.into(),
            iat: now.timestamp(),
            exp: (now + Duration::days(expires_in_days)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            token_type: REFRESH_TOKEN_TYPE.to_string(),
        }
    }
}

/// Access Token + Refresh Token 페어.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenPair {
    /// Access Token
    pub access_token: String,
    /// Refresh Token
    pub refresh_token: String,
    /// Access Token 만료 시간 (초)
    pub expires_in: i64,
    /// 토큰 타입 (항상 "Bearer")
    pub token_type: String,
}

/// JWT 토큰 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰 디코딩 실패")]
    DecodingError,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("잘못된 토큰 형식")]
    InvalidToken,
    #[error("토큰 종류가 올바르지 않습니다")]
    WrongTokenKind,
}

/// Access Token 생성.
pub fn create_access_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(JwtError::from)
}

/// Refresh Token 생성.
pub fn create_refresh_token(claims: &RefreshClaims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(JwtError::from)
}

/// Access Token + Refresh Token 쌍 생성.
///
/// # Arguments
///
/// * `username` - 사용자 이름
/// * `role` - 사용자 역할
/// * `secret` - JWT 비밀 키
/// * `access_expires_minutes` - Access Token 만료 시간 (분)
/// * `refresh_expires_days` - Refresh Token 만료 시간 (일)
pub fn create_token_pair(
    username: &str,
    role: Role,
    secret: &str,
    access_expires_minutes: i64,
    refresh_expires_days: i64,
) -> Result<TokenPair, JwtError> {
    let access_claims = Claims::new(username, role, access_expires_minutes);
    let refresh_claims = RefreshClaims::new(username, refresh_expires_days);

    let access_token = create_access_token(&access_claims, secret)?;
    let refresh_token = create_refresh_token(&refresh_claims, secret)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
        expires_in: access_expires_minutes * 60,
        token_type: "Bearer".to_string(),
    })
}

fn map_decode_error(e: jsonwebtoken::errors::Error) -> JwtError {
    match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::InvalidToken => JwtError::InvalidToken,
        _ => JwtError::DecodingError,
    }
}

/// Access Token 디코딩 및 검증.
///
/// 만료, 서명 불일치, refresh 토큰이 넘어온 경우 모두 에러입니다.
pub fn decode_access_token(token: &str, secret: &str) -> Result<TokenData<Claims>, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(map_decode_error)?;

    if data.claims.token_type != ACCESS_TOKEN_TYPE {
        return Err(JwtError::WrongTokenKind);
    }

    Ok(data)
}

/// Refresh Token 디코딩 및 검증.
pub fn decode_refresh_token(
    token: &str,
    secret: &str,
) -> Result<TokenData<RefreshClaims>, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let data = decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(map_decode_error)?;

    if data.claims.token_type != REFRESH_TOKEN_TYPE {
        return Err(JwtError::WrongTokenKind);
    }

    Ok(data)
}
