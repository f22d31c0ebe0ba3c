//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//! Axum의 State extractor를 통해 핸들러에 주입됩니다.

use shop_core::AuthConfig;
use sqlx::PgPool;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 풀 (PostgreSQL)
    pub db: PgPool,

    /// 인증/토큰 설정
    pub auth: AuthConfig,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(db: PgPool, auth: AuthConfig) -> Self {
        Self {
            db,
            auth,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        sqlx::query("SELECT 1").fetch_one(&self.db).await.is_ok()
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 실제 연결 없이 lazy 풀로 상태를 구성합니다.
/// DB를 실제로 조회하는 경로는 테스트할 수 없습니다.
#[cfg(test)]
pub fn create_test_state() -> AppState {
    use sqlx::postgres::PgPoolOptions;

    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/shop_test")
        .expect("lazy pool creation should not fail");

    AppState::new(pool, AuthConfig::default())
}
