//! 설정 관리.
//!
//! 모든 설정은 환경 변수에서 로드되며, 설정되지 않은 값은 기본값을 사용합니다.

use serde::{Deserialize, Serialize};

/// 프로덕션에서 반드시 교체해야 하는 기본 JWT 시크릿.
pub const INSECURE_DEFAULT_SECRET: &str = "change-this-secret";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증/토큰 설정
    pub auth: AuthConfig,
}

impl AppConfig {
    /// 환경 변수에서 전체 설정 로드.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::from_env(),
        }
    }
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// 환경 변수에서 설정 로드 (API_HOST, API_PORT).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("API_HOST").unwrap_or(defaults.host);
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    /// "host:port" 형식의 바인드 주소 반환.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 연결 풀 설정.
///
/// 연결 문자열 자체는 `DATABASE_URL` 환경 변수로 전달됩니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout_secs: 10,
        }
    }
}

/// 인증/토큰 설정.
///
/// Access token 수명이 두 개인 것은 원 시스템의 동작을 그대로 유지한 것입니다:
/// 로그인 시 24시간, 리프레시 시 15분짜리 access token이 발급됩니다.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT 서명 시크릿
    pub jwt_secret: String,
    /// 로그인 시 발급되는 access token 수명 (분)
    pub access_token_ttl_minutes: i64,
    /// 리프레시 시 발급되는 access token 수명 (분)
    pub refreshed_access_ttl_minutes: i64,
    /// Refresh token 수명 (일)
    pub refresh_token_ttl_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: INSECURE_DEFAULT_SECRET.to_string(),
            access_token_ttl_minutes: 24 * 60,
            refreshed_access_ttl_minutes: 15,
            refresh_token_ttl_days: 30,
        }
    }
}

impl AuthConfig {
    /// 환경 변수에서 설정 로드 (JWT_SECRET_KEY).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let jwt_secret = std::env::var("JWT_SECRET_KEY").unwrap_or(defaults.jwt_secret.clone());

        Self {
            jwt_secret,
            ..defaults
        }
    }

    /// 기본 시크릿을 그대로 사용 중인지 확인.
    pub fn uses_insecure_default(&self) -> bool {
        self.jwt_secret == INSECURE_DEFAULT_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.access_token_ttl_minutes, 1440);
        assert_eq!(config.refreshed_access_ttl_minutes, 15);
        assert_eq!(config.refresh_token_ttl_days, 30);
        assert!(config.uses_insecure_default());
    }

    #[test]
    fn test_secure_secret_detection() {
        let config = AuthConfig {
            jwt_secret: "a-real-secret-from-the-environment".to_string(),
            ..AuthConfig::default()
        };
        assert!(!config.uses_insecure_default());
    }
}
