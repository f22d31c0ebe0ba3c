//! 쇼핑몰 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API (인증, 상품 카탈로그, 주문)
//! - JWT 인증 (access/refresh 쿠키 전송)
//! - 헬스 체크 엔드포인트
//! - Prometheus 메트릭
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 권한 관리
//! - [`repository`]: 데이터베이스 접근 계층
//! - [`metrics`]: Prometheus 메트릭 수집
//! - [`openapi`]: OpenAPI 문서 및 Swagger UI

pub mod auth;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;

pub use auth::{
    hash_password, verify_password, Claims, JwtAuth, JwtAuthError, RefreshAuth, RefreshClaims,
    TokenPair,
};
pub use error::{error_response, ApiErrorResponse, ApiResult};
pub use metrics::setup_metrics_recorder;
pub use routes::create_api_router;
pub use state::AppState;
