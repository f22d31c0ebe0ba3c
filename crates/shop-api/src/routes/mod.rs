//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/` - 홈
//! - `/health` - 헬스 체크 (liveness / readiness)
//! - `/auth` - 회원가입, 로그인, 로그아웃, 토큰 리프레시
//! - `/order` - 주문 생성/조회/상태 업데이트
//! - `/product` - 상품 카탈로그 조회 및 관리

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

pub use auth::{auth_router, MessageResponse, SignInRequest, SignUpRequest, TokenResponse, UserResponse};
pub use health::{health_router, ComponentStatus, HealthResponse};
pub use orders::{
    orders_router, CreateOrderRequest, CreateOrderResponse, OrderResponse, OrdersListResponse,
    UpdateOrderRequest,
};
pub use products::{
    products_router, CreateProductRequest, ProductResponse, ProductsListResponse,
    UpdateProductRequest,
};

use axum::{routing::get, Json, Router};
use std::sync::Arc;

use crate::state::AppState;

/// 홈 페이지.
///
/// GET /
pub async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "This is home page" }))
}

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .nest("/health", health_router())
        .nest("/auth", auth_router())
        .nest("/order", orders_router())
        .nest("/product", products_router())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_home_returns_greeting() {
        let app = create_api_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "This is home page");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let app = create_api_router().with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/does-not-exist")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
