//! 상품 카탈로그 endpoint.
//!
//! 상품 조회는 로그인한 사용자 누구나, 생성/수정/삭제는 admin만 가능합니다.
//! 삭제는 soft delete이며 기본 목록 조회에서 제외됩니다.
//!
//! # 엔드포인트
//!
//! - `POST /product/create` - 상품 생성 (admin)
//! - `PUT /product/update/{id}` - 상품 수정 (admin)
//! - `DELETE /product/delete/{id}` - 상품 soft delete (admin)
//! - `GET /product/single/{id}` - 상품 상세 조회
//! - `GET /product/all` - 상태별 상품 목록 조회 (기본 available)

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::guard::{current_user, require_admin};
use crate::auth::JwtAuth;
use crate::error::{error_response, ApiErrorResponse, ApiResult};
use crate::repository::{NewProduct, ProductRepository, ProductUpdate};
use crate::state::AppState;
use shop_core::{Product, ProductCategory, ProductStatus, Volume};

// ==================== 요청/응답 타입 ====================

/// 상품 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub product_category: ProductCategory,
    pub volume: Volume,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            product_category: product.product_category,
            volume: product.volume,
            status: product.status,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// 상품 목록 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductsListResponse {
    /// 상품 목록
    pub products: Vec<ProductResponse>,
    /// 전체 상품 수
    pub total: usize,
}

/// 상품 생성 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// 상품명
    pub name: String,
    /// 단가 (양수)
    pub price: Decimal,
    /// 초기 재고 수량
    pub stock: i32,
    /// 상품 분류
    pub product_category: ProductCategory,
    /// 용량 등급 (기본 small)
    #[serde(default)]
    pub volume: Volume,
}

/// 상품 수정 요청.
///
/// status를 생략하면 기존 상태가 유지됩니다. `unavailable` 전환은 이
/// 엔드포인트로, `deleted` 전환은 delete 엔드포인트로 수행합니다.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub product_category: ProductCategory,
    #[serde(default)]
    pub volume: Volume,
    #[serde(default)]
    pub status: Option<ProductStatus>,
}

/// 상품 목록 조회 쿼리.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// 조회할 상태 (기본 available)
    #[serde(default)]
    pub status: Option<ProductStatus>,
}

/// 상품 입력 공통 검증. 위반 시 에러 메시지 반환.
fn validate_product_input(name: &str, price: Decimal, stock: i32) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name must not be empty");
    }
    if price <= Decimal::ZERO {
        return Err("price must be positive");
    }
    if stock < 0 {
        return Err("stock must not be negative");
    }
    Ok(())
}

fn validation_error(message: &str) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new("VALIDATION_ERROR", message)),
    )
}

fn product_not_found(product_id: i32) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new(
            "PRODUCT_NOT_FOUND",
            format!("Product not found: {}", product_id),
        )),
    )
}

// ==================== Handler ====================

/// 상품 생성 (admin 전용).
///
/// POST /product/create
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Json(request): Json<CreateProductRequest>,
) -> ApiResult<(StatusCode, Json<ProductResponse>)> {
    require_admin(&state.db, &claims)
        .await
        .map_err(error_response)?;

    validate_product_input(&request.name, request.price, request.stock)
        .map_err(validation_error)?;

    let product = ProductRepository::create(
        &state.db,
        NewProduct {
            name: request.name,
            price: request.price,
            stock: request.stock,
            product_category: request.product_category,
            volume: request.volume,
        },
    )
    .await
    .map_err(error_response)?;

    tracing::info!(product_id = product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

/// 상품 수정 (admin 전용).
///
/// PUT /product/update/{id}
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(product_id): Path<i32>,
    Json(request): Json<UpdateProductRequest>,
) -> ApiResult<Json<ProductResponse>> {
    require_admin(&state.db, &claims)
        .await
        .map_err(error_response)?;

    validate_product_input(&request.name, request.price, request.stock)
        .map_err(validation_error)?;

    let product = ProductRepository::update(
        &state.db,
        product_id,
        ProductUpdate {
            name: request.name,
            price: request.price,
            stock: request.stock,
            product_category: request.product_category,
            volume: request.volume,
            status: request.status,
        },
    )
    .await
    .map_err(error_response)?
    .ok_or_else(|| product_not_found(product_id))?;

    Ok(Json(ProductResponse::from(&product)))
}

/// 상품 soft delete (admin 전용).
///
/// 행은 제거되지 않고 상태만 deleted로 전이됩니다.
///
/// DELETE /product/delete/{id}
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(product_id): Path<i32>,
) -> ApiResult<Json<ProductResponse>> {
    require_admin(&state.db, &claims)
        .await
        .map_err(error_response)?;

    let product = ProductRepository::soft_delete(&state.db, product_id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| product_not_found(product_id))?;

    tracing::info!(product_id = product.id, "Product soft-deleted");

    Ok(Json(ProductResponse::from(&product)))
}

/// 상품 상세 조회.
///
/// GET /product/single/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(product_id): Path<i32>,
) -> ApiResult<Json<ProductResponse>> {
    current_user(&state.db, &claims)
        .await
        .map_err(error_response)?;

    let product = ProductRepository::get_by_id(&state.db, product_id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| product_not_found(product_id))?;

    Ok(Json(ProductResponse::from(&product)))
}

/// 상태별 상품 목록 조회.
///
/// 기본값은 available이며, 결과가 없으면 빈 목록을 반환합니다.
///
/// GET /product/all?status=available
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Query(query): Query<ProductListQuery>,
) -> ApiResult<Json<ProductsListResponse>> {
    current_user(&state.db, &claims)
        .await
        .map_err(error_response)?;

    let status = query.status.unwrap_or(ProductStatus::Available);
    let products = ProductRepository::list_by_status(&state.db, status)
        .await
        .map_err(error_response)?;

    let products: Vec<ProductResponse> = products.iter().map(ProductResponse::from).collect();
    let total = products.len();

    Ok(Json(ProductsListResponse { products, total }))
}

// ==================== 라우터 ====================

/// 상품 카탈로그 라우터 생성.
pub fn products_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(create_product))
        .route("/update/{id}", put(update_product))
        .route("/delete/{id}", delete(delete_product))
        .route("/single/{id}", get(get_product))
        .route("/all", get(list_products))
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    #[test]
    fn test_validate_product_input() {
        assert!(validate_product_input("Americano", dec!(10.0), 3).is_ok());
        assert!(validate_product_input("", dec!(10.0), 3).is_err());
        assert!(validate_product_input("   ", dec!(10.0), 3).is_err());
        assert!(validate_product_input("Americano", dec!(0), 3).is_err());
        assert!(validate_product_input("Americano", dec!(-1.5), 3).is_err());
        assert!(validate_product_input("Americano", dec!(10.0), -1).is_err());
        assert!(validate_product_input("Americano", dec!(10.0), 0).is_ok());
    }

    #[test]
    fn test_create_request_volume_defaults_to_small() {
        let request: CreateProductRequest = serde_json::from_str(
            r#"{"name": "Kimbap", "price": "4.5", "stock": 10, "product_category": "food"}"#,
        )
        .unwrap();

        assert_eq!(request.volume, Volume::Small);
        assert_eq!(request.product_category, ProductCategory::Food);
    }

    #[test]
    fn test_update_request_status_is_optional() {
        let request: UpdateProductRequest = serde_json::from_str(
            r#"{"name": "Kimbap", "price": "4.5", "stock": 10, "product_category": "food"}"#,
        )
        .unwrap();
        assert!(request.status.is_none());

        let request: UpdateProductRequest = serde_json::from_str(
            r#"{"name": "Kimbap", "price": "4.5", "stock": 10,
                "product_category": "food", "status": "unavailable"}"#,
        )
        .unwrap();
        assert_eq!(request.status, Some(ProductStatus::Unavailable));

        // 인식할 수 없는 상태 값은 거부
        assert!(serde_json::from_str::<UpdateProductRequest>(
            r#"{"name": "Kimbap", "price": "4.5", "stock": 10,
                "product_category": "food", "status": "archived"}"#,
        )
        .is_err());
    }

    #[tokio::test]
    async fn test_list_products_requires_token() {
        let app = Router::new()
            .route("/product/all", get(list_products))
            .with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/product/all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_product_requires_token() {
        let app = Router::new()
            .route("/product/create", post(create_product))
            .with_state(Arc::new(create_test_state()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/product/create")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"name": "x", "price": "1", "stock": 1, "product_category": "other"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
