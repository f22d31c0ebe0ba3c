//! 상품 저장소.
//!
//! 카탈로그 생성, 수정, soft delete, 조회를 위한 데이터베이스 작업을
//! 처리합니다. 삭제된 상품의 행은 제거되지 않고 상태만 전이됩니다.

use shop_core::{Product, ProductCategory, ProductStatus, ShopError, Volume};
use sqlx::PgPool;

/// 새 상품 생성 입력.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: rust_decimal::Decimal,
    pub stock: i32,
    pub product_category: ProductCategory,
    pub volume: Volume,
}

/// 상품 수정 입력.
///
/// status는 선택적입니다. None이면 기존 상태를 유지합니다.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub price: rust_decimal::Decimal,
    pub stock: i32,
    pub product_category: ProductCategory,
    pub volume: Volume,
    pub status: Option<ProductStatus>,
}

/// 상품 저장소.
pub struct ProductRepository;

impl ProductRepository {
    /// 새 상품 생성. 상태는 available로 시작합니다.
    pub async fn create(pool: &PgPool, input: NewProduct) -> Result<Product, ShopError> {
        let record = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, stock, product_category, volume, status)
            VALUES ($1, $2, $3, $4, $5, 'available')
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.stock)
        .bind(input.product_category)
        .bind(input.volume)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// 상품 수정.
    ///
    /// 대상이 없으면 None을 반환합니다.
    pub async fn update(
        pool: &PgPool,
        product_id: i32,
        input: ProductUpdate,
    ) -> Result<Option<Product>, ShopError> {
        let record = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, price = $3, stock = $4, product_category = $5,
                volume = $6, status = COALESCE($7, status), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(&input.name)
        .bind(input.price)
        .bind(input.stock)
        .bind(input.product_category)
        .bind(input.volume)
        .bind(input.status)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 상품 soft delete (status → deleted).
    ///
    /// 대상이 없으면 None을 반환합니다.
    pub async fn soft_delete(pool: &PgPool, product_id: i32) -> Result<Option<Product>, ShopError> {
        let record = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET status = 'deleted', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(product_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// 상품 ID로 조회.
    pub async fn get_by_id(pool: &PgPool, product_id: i32) -> Result<Option<Product>, ShopError> {
        let record = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// 상태별 상품 목록 조회.
    pub async fn list_by_status(
        pool: &PgPool,
        status: ProductStatus,
    ) -> Result<Vec<Product>, ShopError> {
        let records = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE status = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}
