//! # 사용자 리포지토리 구현
//!
//! `users` 테이블의 데이터 액세스를 담당합니다.

use std::sync::Arc;
use once_cell::sync::OnceCell;
use serde_json::json;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppError;

const TABLE: &str = "users";

/// 사용자 데이터 액세스 리포지토리
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::instance();
///
/// let page = repo.find_page(0, 20).await?;
/// let total = repo.count().await?;
/// repo.set_stripe_customer_id(&user_id, "cus_123").await?;
/// ```
pub struct UserRepository {
    db: Arc<Database>,
}

static USER_REPOSITORY_INSTANCE: OnceCell<Arc<UserRepository>> = OnceCell::new();

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn instance() -> Arc<Self> {
        USER_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<Database>())))
            .clone()
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.db.table(TABLE).select("*").eq("id", user_id).fetch_one().await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.db.table(TABLE).select("*").eq("email", email).fetch_one().await
    }

    /// 가입일 내림차순 페이지
    pub async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<User>, AppError> {
        self.db
            .table(TABLE)
            .select("*")
            .order("created_at", false)
            .offset(offset)
            .limit(limit)
            .fetch()
            .await
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        self.db.table(TABLE).select("id").count().await
    }

    /// 결제 프로바이더 고객 ID를 기록합니다.
    pub async fn set_stripe_customer_id(&self, user_id: &str, customer_id: &str) -> Result<(), AppError> {
        let _: Vec<User> = self
            .db
            .table(TABLE)
            .eq("id", user_id)
            .update(&json!({ "stripe_customer_id": customer_id }))
            .await?;

        log::info!("사용자 {} 고객 ID 기록: {}", user_id, customer_id);
        Ok(())
    }

    pub async fn delete(&self, user_id: &str) -> Result<(), AppError> {
        self.db.table(TABLE).eq("id", user_id).delete().await
    }
}

fn user_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(UserRepository::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::RepositoryRegistration {
        name: "user_repository",
        constructor: user_repository_constructor,
    }
}
