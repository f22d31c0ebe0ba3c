//! 주문 저장소.
//!
//! 주문 생성 트랜잭션, 조회, 상태 업데이트를 위한 데이터베이스 작업을
//! 처리합니다. 모든 조회/수정은 소유자 기준으로 필터링되어, 타인의 주문은
//! 존재하지 않는 주문과 구분되지 않습니다.

use rust_decimal::Decimal;
use shop_core::{Order, OrderStatus, Product, ShopError};
use sqlx::PgPool;
use std::collections::HashSet;

/// 주문과 주문에 포함된 상품 목록.
#[derive(Debug, Clone)]
pub struct OrderWithProducts {
    pub order: Order,
    pub products: Vec<Product>,
}

/// 주문 저장소.
pub struct OrderRepository;

impl OrderRepository {
    /// 주문 생성 트랜잭션.
    ///
    /// 하나의 트랜잭션 안에서 요청 순서대로:
    /// 1. 각 상품 행을 `FOR UPDATE`로 잠그고 조회 — 없으면 NotFound
    /// 2. 상태가 available이 아니거나 재고가 1 미만이면 Conflict
    /// 3. 가격을 합산해 주문 행 생성 (status pending, quantity = 상품 수)
    /// 4. 연결 테이블에 상품을 연결하고 재고를 1씩 차감
    ///
    /// 커밋 전에 실패하면 어떤 쓰기도 남지 않습니다. 행 잠금 덕분에 동시
    /// 주문이 같은 상품을 두고 경합해도 재고는 음수가 될 수 없습니다.
    pub async fn create_order(
        pool: &PgPool,
        user_id: i32,
        product_ids: &[i32],
    ) -> Result<OrderWithProducts, ShopError> {
        if product_ids.is_empty() {
            return Err(ShopError::Validation(
                "Order must contain at least one product".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for &product_id in product_ids {
            if !seen.insert(product_id) {
                return Err(ShopError::Validation(format!(
                    "Duplicate product id in order: {}",
                    product_id
                )));
            }
        }

        let mut tx = pool.begin().await?;

        let mut total = Decimal::ZERO;
        let mut products = Vec::with_capacity(product_ids.len());

        for &product_id in product_ids {
            let product = sqlx::query_as::<_, Product>(
                "SELECT * FROM products WHERE id = $1 FOR UPDATE",
            )
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ShopError::NotFound(format!("Product not found: {}", product_id)))?;

            if !product.status.is_purchasable() {
                return Err(ShopError::Conflict(format!(
                    "Product {} is not available (status: {})",
                    product_id, product.status
                )));
            }

            if product.stock < 1 {
                return Err(ShopError::Conflict(format!(
                    "Product {} is out of stock",
                    product_id
                )));
            }

            total += product.price;
            products.push(product);
        }

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, quantity, total_amount, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(products.len() as i32)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        for product in &mut products {
            sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES ($1, $2)")
                .bind(order.id)
                .bind(product.id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                "UPDATE products SET stock = stock - 1, updated_at = NOW() WHERE id = $1",
            )
            .bind(product.id)
            .execute(&mut *tx)
            .await?;

            product.stock -= 1;
        }

        tx.commit().await?;

        tracing::info!(
            order_id = order.id,
            user_id,
            quantity = order.quantity,
            total = %order.total_amount,
            "Order created"
        );

        Ok(OrderWithProducts { order, products })
    }

    /// 사용자의 주문 목록 조회.
    pub async fn list_for_user(pool: &PgPool, user_id: i32) -> Result<Vec<Order>, ShopError> {
        let records = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// 주문 ID + 소유자로 조회.
    pub async fn get_for_user(
        pool: &PgPool,
        order_id: i32,
        user_id: i32,
    ) -> Result<Option<Order>, ShopError> {
        let record =
            sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 AND user_id = $2")
                .bind(order_id)
                .bind(user_id)
                .fetch_optional(pool)
                .await?;

        Ok(record)
    }

    /// 주문 상태 업데이트 (소유자만).
    ///
    /// 전이 그래프는 강제하지 않습니다. 대상이 없거나 소유자가 다르면 None.
    pub async fn update_status_for_user(
        pool: &PgPool,
        order_id: i32,
        user_id: i32,
        status: OrderStatus,
    ) -> Result<Option<Order>, ShopError> {
        let record = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(user_id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
