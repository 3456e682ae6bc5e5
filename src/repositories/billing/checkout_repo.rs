//! # 체크아웃 리포지토리
//!
//! `checkout_sessions`(세션 기록)과 `temp_users`(결제 전 가입 정보)를 다룹니다.

use std::sync::Arc;
use once_cell::sync::OnceCell;
use serde_json::json;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::entities::billing::checkout::{
    CheckoutSessionRecord, StoredCredentials, TempUser, CHECKOUT_COMPLETED,
};
use crate::errors::errors::AppError;

pub struct CheckoutRepository {
    db: Arc<Database>,
}

static CHECKOUT_REPOSITORY_INSTANCE: OnceCell<Arc<CheckoutRepository>> = OnceCell::new();

impl CheckoutRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn instance() -> Arc<Self> {
        CHECKOUT_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<Database>())))
            .clone()
    }

    pub async fn insert_session(&self, record: &CheckoutSessionRecord) -> Result<(), AppError> {
        let _: Vec<CheckoutSessionRecord> = self
            .db
            .table("checkout_sessions")
            .insert(record)
            .await?;
        Ok(())
    }

    pub async fn find_session(&self, session_id: &str) -> Result<Option<CheckoutSessionRecord>, AppError> {
        self.db
            .table("checkout_sessions")
            .select("*")
            .eq("session_id", session_id)
            .fetch_one()
            .await
    }

    pub async fn mark_completed(&self, session_id: &str) -> Result<(), AppError> {
        let _: Vec<CheckoutSessionRecord> = self
            .db
            .table("checkout_sessions")
            .eq("session_id", session_id)
            .update(&json!({ "status": CHECKOUT_COMPLETED }))
            .await?;
        Ok(())
    }

    /// 승격된 사용자 ID와 로그인 교환용 자격 증명을 한 번에 기록합니다.
    pub async fn store_promotion(
        &self,
        session_id: &str,
        user_id: &str,
        credentials: &StoredCredentials,
    ) -> Result<(), AppError> {
        let _: Vec<CheckoutSessionRecord> = self
            .db
            .table("checkout_sessions")
            .eq("session_id", session_id)
            .update(&json!({ "user_id": user_id, "user_data": credentials }))
            .await?;
        Ok(())
    }

    pub async fn find_temp_user(&self, temp_user_id: &str) -> Result<Option<TempUser>, AppError> {
        self.db
            .table("temp_users")
            .select("*")
            .eq("id", temp_user_id)
            .fetch_one()
            .await
    }

    pub async fn delete_temp_user(&self, temp_user_id: &str) -> Result<(), AppError> {
        self.db.table("temp_users").eq("id", temp_user_id).delete().await
    }
}

fn checkout_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(CheckoutRepository::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::RepositoryRegistration {
        name: "checkout_repository",
        constructor: checkout_repository_constructor,
    }
}
