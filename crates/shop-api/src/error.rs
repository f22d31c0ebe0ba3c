//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//! 도메인 에러([`ShopError`])를 HTTP 상태 코드와 JSON 본문으로 변환합니다.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shop_core::ShopError;
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "PRODUCT_NOT_FOUND",
///   "message": "Product not found: 5"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "DB_ERROR", "INVALID_INPUT", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
}

impl ApiErrorResponse {
    /// 에러 응답 생성.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 도메인 에러를 HTTP 응답으로 변환합니다.
///
/// 상태 코드 계약:
/// - Validation → 400
/// - Auth → 401
/// - Permission → 403
/// - NotFound → 404
/// - Conflict → 400 (중복 계정, 재고 부족 등은 모두 400으로 응답)
/// - Database / Config / Internal → 500
pub fn error_response(err: ShopError) -> (StatusCode, Json<ApiErrorResponse>) {
    let (status, code) = match &err {
        ShopError::Validation(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        ShopError::Auth(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ShopError::Permission(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ShopError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ShopError::Conflict(_) => (StatusCode::BAD_REQUEST, "CONFLICT"),
        ShopError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR"),
        ShopError::Config(_) | ShopError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "Request failed with server error");
    }

    let message = match &err {
        // 5xx는 내부 상세를 숨기고 일반 메시지로 응답
        ShopError::Database(_) | ShopError::Config(_) | ShopError::Internal(_) => {
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    (status, Json(ApiErrorResponse::new(code, message)))
}
