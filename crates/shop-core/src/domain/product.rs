//! 상품 카탈로그 타입.
//!
//! - `ProductCategory` - 상품 분류
//! - `Volume` - 용량 등급
//! - `ProductStatus` - 상품 라이프사이클 상태 (soft delete 포함)
//! - `Product` - products 테이블 레코드

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 상품 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx-support",
    sqlx(type_name = "productcategory", rename_all = "lowercase")
)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum ProductCategory {
    Food,
    Drink,
    Other,
}

impl ProductCategory {
    /// 문자열로 변환.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Food => "food",
            ProductCategory::Drink => "drink",
            ProductCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 용량 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx-support",
    sqlx(type_name = "volume", rename_all = "lowercase")
)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum Volume {
    Small,
    Medium,
    Large,
}

impl Volume {
    /// 문자열로 변환.
    pub fn as_str(&self) -> &'static str {
        match self {
            Volume::Small => "small",
            Volume::Medium => "medium",
            Volume::Large => "large",
        }
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for Volume {
    fn default() -> Self {
        Volume::Small
    }
}

/// 상품 라이프사이클 상태.
///
/// 삭제는 행 제거가 아닌 `Deleted` 상태 전이로 모델링됩니다.
/// 과거 주문과의 참조 무결성을 유지하기 위함입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx-support",
    sqlx(type_name = "productstatus", rename_all = "lowercase")
)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum ProductStatus {
    Available,
    Unavailable,
    Deleted,
}

impl ProductStatus {
    /// 문자열로 변환.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Available => "available",
            ProductStatus::Unavailable => "unavailable",
            ProductStatus::Deleted => "deleted",
        }
    }

    /// 구매 가능한 상태인지 확인.
    pub fn is_purchasable(&self) -> bool {
        matches!(self, ProductStatus::Available)
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 상품 레코드.
///
/// products 테이블의 데이터베이스 표현입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i32,
    pub name: String,
    /// 단가. 주문 시점의 값이 주문 총액에 고정됩니다.
    pub price: Decimal,
    /// 남은 재고 수량. 0 미만이 될 수 없습니다.
    pub stock: i32,
    pub product_category: ProductCategory,
    pub volume: Volume,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
