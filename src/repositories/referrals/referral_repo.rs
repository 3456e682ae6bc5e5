//! # 추천 코드 리포지토리
//!
//! 코드 생성은 데이터베이스 함수 `generate_referral_code`가 담당하며 고유성도 그쪽에서 보장합니다.

use std::sync::Arc;
use chrono::Utc;
use once_cell::sync::OnceCell;
use serde_json::json;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::entities::referrals::referral::{NewReferral, Referral};
use crate::errors::errors::AppError;

const TABLE: &str = "referrals";

pub struct ReferralRepository {
    db: Arc<Database>,
}

static REFERRAL_REPOSITORY_INSTANCE: OnceCell<Arc<ReferralRepository>> = OnceCell::new();

impl ReferralRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn instance() -> Arc<Self> {
        REFERRAL_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<Database>())))
            .clone()
    }

    /// 가장 오래된 미전환 추천 행
    pub async fn find_open_by_referrer(&self, referrer_id: &str) -> Result<Option<Referral>, AppError> {
        self.db
            .table(TABLE)
            .select("*")
            .eq("referrer_id", referrer_id)
            .eq("converted", false)
            .order("created_at", true)
            .fetch_one()
            .await
    }

    pub async fn find_by_referrer(&self, referrer_id: &str) -> Result<Vec<Referral>, AppError> {
        self.db
            .table(TABLE)
            .select("*")
            .eq("referrer_id", referrer_id)
            .fetch()
            .await
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Referral>, AppError> {
        self.db
            .table(TABLE)
            .select("*")
            .eq("code", code)
            .order("created_at", true)
            .fetch_one()
            .await
    }

    pub async fn generate_code(&self) -> Result<String, AppError> {
        self.db.rpc("generate_referral_code", &json!({})).await
    }

    pub async fn create(&self, referral: &NewReferral) -> Result<Referral, AppError> {
        let rows: Vec<Referral> = self.db.table(TABLE).insert(referral).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::DatabaseError("추천 코드 삽입 결과가 비어 있습니다".to_string()))
    }

    pub async fn set_referred_email(&self, code: &str, email: &str) -> Result<(), AppError> {
        let _: Vec<Referral> = self
            .db
            .table(TABLE)
            .eq("code", code)
            .eq("converted", false)
            .update(&json!({ "referred_email": email }))
            .await?;
        Ok(())
    }

    /// 코드의 미전환 행을 전환 처리합니다. 갱신된 행 수를 반환합니다.
    pub async fn mark_converted(&self, code: &str, referred_user_id: Option<&str>) -> Result<usize, AppError> {
        let rows: Vec<Referral> = self
            .db
            .table(TABLE)
            .eq("code", code)
            .eq("converted", false)
            .update(&json!({
                "converted": true,
                "converted_at": Utc::now(),
                "referred_user_id": referred_user_id,
            }))
            .await?;
        Ok(rows.len())
    }
}

fn referral_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(ReferralRepository::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::RepositoryRegistration {
        name: "referral_repository",
        constructor: referral_repository_constructor,
    }
}
