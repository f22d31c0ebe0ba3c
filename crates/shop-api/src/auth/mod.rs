//! JWT 인증 및 권한 관리.
//!
//! - [`jwt`]: 토큰 생성/검증
//! - [`password`]: 비밀번호 해싱
//! - [`guard`]: 요청 인증 추출기 및 역할 검사

pub mod guard;
pub mod jwt;
pub mod password;

pub use guard::{current_user, require_admin, JwtAuth, JwtAuthError, JwtConfig, RefreshAuth};
pub use jwt::{
    create_token_pair, decode_access_token, decode_refresh_token, Claims, JwtError, RefreshClaims,
    TokenPair,
};
pub use password::{hash_password, verify_password, PasswordError};
