//! 주문 endpoint.
//!
//! 주문 생성, 조회, 상태 업데이트를 위한 REST API를 제공합니다.
//! 모든 엔드포인트는 access token을 요구하며, 주문은 소유자만 접근할 수
//! 있습니다. 타인의 주문은 404로 응답합니다.
//!
//! # 엔드포인트
//!
//! - `GET /order/all` - 내 주문 목록 조회
//! - `POST /order/create` - 주문 생성
//! - `PUT /order/update/{id}` - 주문 상태 업데이트
//! - `GET /order/single/{id}` - 주문 상세 조회

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::auth::guard::current_user;
use crate::auth::JwtAuth;
use crate::error::{error_response, ApiErrorResponse, ApiResult};
use crate::metrics::record_order;
use crate::repository::OrderRepository;
use crate::routes::products::ProductResponse;
use crate::state::AppState;
use shop_core::{Order, OrderStatus};

// ==================== 요청/응답 타입 ====================

/// 주문 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    /// 주문 ID
    pub id: i32,
    /// 주문자 ID
    pub user_id: i32,
    /// 주문에 포함된 상품 수
    pub quantity: i32,
    /// 주문 시점 가격 합계
    pub total_amount: Decimal,
    /// 주문 상태
    pub status: OrderStatus,
    /// 생성 시간
    pub created_at: DateTime<Utc>,
    /// 업데이트 시간
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            quantity: order.quantity,
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// 주문 목록 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrdersListResponse {
    /// 주문 목록
    pub orders: Vec<OrderResponse>,
    /// 전체 주문 수
    pub total: usize,
}

/// 주문 생성 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// 주문할 상품 ID 목록 (비어 있으면 안 됨, 중복 불가)
    pub product_ids: Vec<i32>,
}

/// 주문 생성 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    /// 성공 여부
    pub success: bool,
    /// 메시지
    pub message: String,
    /// 생성된 주문
    pub order: OrderResponse,
    /// 주문에 포함된 상품 목록
    pub products: Vec<ProductResponse>,
}

/// 주문 상태 업데이트 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    /// 새 주문 상태
    pub status: OrderStatus,
}

fn order_not_found(order_id: i32) -> (StatusCode, Json<ApiErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiErrorResponse::new(
            "ORDER_NOT_FOUND",
            format!("Order not found: {}", order_id),
        )),
    )
}

// ==================== Handler ====================

/// 내 주문 목록 조회.
///
/// GET /order/all
pub async fn get_orders(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
) -> ApiResult<Json<OrdersListResponse>> {
    let user = current_user(&state.db, &claims)
        .await
        .map_err(error_response)?;

    let orders = OrderRepository::list_for_user(&state.db, user.id)
        .await
        .map_err(error_response)?;

    let orders: Vec<OrderResponse> = orders.iter().map(OrderResponse::from).collect();
    let total = orders.len();

    Ok(Json(OrdersListResponse { orders, total }))
}

/// 주문 생성.
///
/// 요청한 모든 상품의 검증, 총액 계산, 재고 차감이 하나의 트랜잭션으로
/// 수행됩니다. 중간에 실패하면 아무것도 기록되지 않습니다.
///
/// POST /order/create
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<CreateOrderResponse>)> {
    let user = current_user(&state.db, &claims)
        .await
        .map_err(error_response)?;

    let result = OrderRepository::create_order(&state.db, user.id, &request.product_ids)
        .await
        .map_err(|err| {
            let (status, body) = error_response(err);
            // 이 라우트의 계약: 존재하지 않는 상품을 참조한 경우에도 400
            if status == StatusCode::NOT_FOUND {
                (StatusCode::BAD_REQUEST, body)
            } else {
                (status, body)
            }
        })?;

    record_order("created");

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            success: true,
            message: "주문이 성공적으로 생성되었습니다".to_string(),
            order: OrderResponse::from(&result.order),
            products: result.products.iter().map(ProductResponse::from).collect(),
        }),
    ))
}

/// 주문 상태 업데이트.
///
/// 소유자만 수행할 수 있으며, 상태 전이 그래프는 강제하지 않습니다.
///
/// PUT /order/update/{id}
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(order_id): Path<i32>,
    Json(request): Json<UpdateOrderRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let user = current_user(&state.db, &claims)
        .await
        .map_err(error_response)?;

    let order =
        OrderRepository::update_status_for_user(&state.db, order_id, user.id, request.status)
            .await
            .map_err(error_response)?
            .ok_or_else(|| order_not_found(order_id))?;

    record_order(order.status.as_str());

    Ok(Json(OrderResponse::from(&order)))
}

/// 주문 상세 조회.
///
/// GET /order/single/{id}
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    JwtAuth(claims): JwtAuth,
    Path(order_id): Path<i32>,
) -> ApiResult<Json<OrderResponse>> {
    let user = current_user(&state.db, &claims)
        .await
        .map_err(error_response)?;

    let order = OrderRepository::get_for_user(&state.db, order_id, user.id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| order_not_found(order_id))?;

    Ok(Json(OrderResponse::from(&order)))
}

// ==================== 라우터 ====================

/// 주문 라우터 생성.
pub fn orders_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/all", get(get_orders))
        .route("/create", post(create_order))
        .route("/update/{id}", put(update_order))
        .route("/single/{id}", get(get_order))
}

// ==================== 테스트 ====================
