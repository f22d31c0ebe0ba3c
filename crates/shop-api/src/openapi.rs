//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::TokenPair;
use crate::error::ApiErrorResponse;
use crate::routes::{
    ComponentStatus, CreateOrderRequest, CreateOrderResponse, CreateProductRequest,
    HealthResponse, MessageResponse, OrderResponse, OrdersListResponse, ProductResponse,
    ProductsListResponse, SignInRequest, SignUpRequest, TokenResponse, UpdateOrderRequest,
    UpdateProductRequest, UserResponse,
};
use shop_core::{OrderStatus, ProductCategory, ProductStatus, Role, Volume};

/// Shop API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shop API",
        version = "0.1.0",
        description = r#"
# 쇼핑몰 백엔드 REST API

인증, 상품 카탈로그, 주문을 위한 REST API입니다.

## 인증

로그인 시 access/refresh 토큰이 쿠키로 설정됩니다.
`Authorization: Bearer <token>` 헤더도 사용할 수 있습니다.
상품 생성/수정/삭제는 admin 역할이 필요합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 회원가입/로그인/토큰 관리"),
        (name = "orders", description = "주문 - 주문 생성/조회/상태 업데이트"),
        (name = "products", description = "상품 - 카탈로그 조회 및 관리"),
    ),
    components(schemas(
        ApiErrorResponse,
        TokenPair,
        SignUpRequest,
        SignInRequest,
        TokenResponse,
        MessageResponse,
        UserResponse,
        CreateOrderRequest,
        CreateOrderResponse,
        UpdateOrderRequest,
        OrderResponse,
        OrdersListResponse,
        CreateProductRequest,
        UpdateProductRequest,
        ProductResponse,
        ProductsListResponse,
        HealthResponse,
        ComponentStatus,
        Role,
        OrderStatus,
        ProductCategory,
        ProductStatus,
        Volume,
    ))
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
pub fn swagger_ui_router() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_builds() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("Shop API"));
        assert!(json.contains("SignUpRequest"));
        assert!(json.contains("OrderResponse"));
    }
}
