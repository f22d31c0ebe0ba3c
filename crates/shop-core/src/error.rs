//! 쇼핑몰 백엔드의 에러 타입.
//!
//! 이 모듈은 시스템 전반에서 사용되는 에러 분류를 정의합니다.
//! HTTP 상태 코드 매핑은 API 크레이트에서 수행합니다.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum ShopError {
    /// 잘못되거나 누락된 입력
    #[error("잘못된 입력: {0}")]
    Validation(String),

    /// 토큰 누락/만료/위조 등 인증 실패
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 인증은 되었으나 권한 부족
    #[error("권한 부족: {0}")]
    Permission(String),

    /// 참조한 엔티티가 존재하지 않음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 현재 상태가 작업을 허용하지 않음 (중복 계정, 재고 부족 등)
    #[error("상태 충돌: {0}")]
    Conflict(String),

    /// 데이터베이스 에러
    #[error("데이터베이스 에러: {0}")]
    Database(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type ShopResult<T> = Result<T, ShopError>;

impl ShopError {
    /// 호출자 입력에서 비롯된 에러인지 확인합니다 (4xx 계열).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ShopError::Validation(_)
                | ShopError::Auth(_)
                | ShopError::Permission(_)
                | ShopError::NotFound(_)
                | ShopError::Conflict(_)
        )
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ShopError {
    fn from(err: sqlx::Error) -> Self {
        ShopError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(ShopError::Validation("empty password".to_string()).is_client_error());
        assert!(ShopError::NotFound("product 5".to_string()).is_client_error());
        assert!(ShopError::Conflict("out of stock".to_string()).is_client_error());

        assert!(!ShopError::Database("connection reset".to_string()).is_client_error());
        assert!(!ShopError::Internal("oops".to_string()).is_client_error());
    }

    #[test]
    fn test_error_display_includes_detail() {
        let err = ShopError::NotFound("order 42".to_string());
        assert!(err.to_string().contains("order 42"));
    }
}
