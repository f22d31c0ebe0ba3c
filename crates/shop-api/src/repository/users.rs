//! 사용자 저장소.
//!
//! 계정 생성 및 조회를 위한 데이터베이스 작업을 처리합니다.

use shop_core::{Role, ShopError, User};
use sqlx::PgPool;

/// 새 사용자 생성 입력.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub is_staff: bool,
}

/// 사용자 저장소.
pub struct UserRepository;

impl UserRepository {
    /// 새 계정 생성.
    ///
    /// username 또는 email이 이미 존재하면 `ShopError::Conflict`.
    /// 사전 검사와 별개로 unique 제약 위반도 Conflict로 매핑합니다.
    pub async fn create(pool: &PgPool, input: NewUser) -> Result<User, ShopError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(&input.username)
        .bind(&input.email)
        .fetch_one(pool)
        .await?;

        if exists {
            return Err(ShopError::Conflict("User already exists".to_string()));
        }

        let record = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, role, is_active, is_staff)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(input.role)
        .bind(input.is_active)
        .bind(input.is_staff)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return ShopError::Conflict("User already exists".to_string());
                }
            }
            ShopError::from(e)
        })?;

        Ok(record)
    }

    /// 사용자 이름으로 조회.
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, ShopError> {
        let record = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;

        Ok(record)
    }

    /// 사용자 이름 또는 이메일로 조회.
    ///
    /// 로그인에서 사용합니다. 대소문자를 구분하는 정확 일치입니다.
    pub async fn find_by_username_or_email(
        pool: &PgPool,
        value: &str,
    ) -> Result<Option<User>, ShopError> {
        let record =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 OR email = $1")
                .bind(value)
                .fetch_optional(pool)
                .await?;

        Ok(record)
    }
}
