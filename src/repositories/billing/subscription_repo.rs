//! # 구독 리포지토리
//!
//! `subscriptions`, `subscription_payments`, `usage_limits` 테이블을 다룹니다.

use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::entities::billing::subscription::{
    Subscription, SubscriptionChanges, SubscriptionPayment, UsageLimit,
};
use crate::errors::errors::AppError;

pub struct SubscriptionRepository {
    db: Arc<Database>,
}

static SUBSCRIPTION_REPOSITORY_INSTANCE: OnceCell<Arc<SubscriptionRepository>> = OnceCell::new();

impl SubscriptionRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn instance() -> Arc<Self> {
        SUBSCRIPTION_REPOSITORY_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ServiceLocator::get::<Database>())))
            .clone()
    }

    pub async fn find_by_user(&self, user_id: &str) -> Result<Option<Subscription>, AppError> {
        self.db
            .table("subscriptions")
            .select("*")
            .eq("user_id", user_id)
            .fetch_one()
            .await
    }

    pub async fn find_by_users(&self, user_ids: &[String]) -> Result<Vec<Subscription>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.db
            .table("subscriptions")
            .select("*")
            .in_("user_id", user_ids)
            .fetch()
            .await
    }

    /// 사용자당 한 행을 유지합니다 (`on_conflict=user_id`).
    pub async fn upsert(&self, subscription: &Subscription) -> Result<(), AppError> {
        let _: Vec<Subscription> = self
            .db
            .table("subscriptions")
            .upsert(subscription, "user_id")
            .await?;
        Ok(())
    }

    /// 결제 프로바이더 구독 ID로 찾은 행을 갱신합니다. 갱신된 행 수를 반환합니다.
    pub async fn update_by_stripe_id(
        &self,
        stripe_subscription_id: &str,
        changes: &SubscriptionChanges,
    ) -> Result<usize, AppError> {
        let rows: Vec<Subscription> = self
            .db
            .table("subscriptions")
            .eq("stripe_subscription_id", stripe_subscription_id)
            .update(changes)
            .await?;
        Ok(rows.len())
    }

    /// 체크아웃 세션당 한 행. 같은 세션을 다시 기록하면 덮어씁니다.
    pub async fn record_payment(&self, payment: &SubscriptionPayment) -> Result<(), AppError> {
        let _: Vec<SubscriptionPayment> = self
            .db
            .table("subscription_payments")
            .upsert(payment, "stripe_session_id")
            .await?;
        Ok(())
    }

    pub async fn payments_for_user(&self, user_id: &str) -> Result<Vec<SubscriptionPayment>, AppError> {
        self.db
            .table("subscription_payments")
            .select("*")
            .eq("user_id", user_id)
            .order("created_at", false)
            .fetch()
            .await
    }

    /// 한도 행이 없으면 `None`
    pub async fn usage_limit(&self, user_id: &str) -> Result<Option<UsageLimit>, AppError> {
        self.db
            .table("usage_limits")
            .select("max_lists,max_profiles,max_messages")
            .eq("user_id", user_id)
            .fetch_one()
            .await
    }
}

fn subscription_repository_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(SubscriptionRepository::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::RepositoryRegistration {
        name: "subscription_repository",
        constructor: subscription_repository_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_upsert_merges_on_user_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/subscriptions")
                    .query_param("on_conflict", "user_id")
                    .header("prefer", "resolution=merge-duplicates,return=representation");
                then.status(201).json_body(json!([]));
            })
            .await;

        let db = Arc::new(Database::with_credentials(&server.base_url(), "key", 5).unwrap());
        let subscription = Subscription {
            id: None,
            user_id: "u1".to_string(),
            stripe_customer_id: Some("cus_1".to_string()),
            stripe_subscription_id: Some("sub_1".to_string()),
            plan_name: Some("Pro".to_string()),
            price_id: Some("price_1".to_string()),
            status: "active".to_string(),
            current_period_end: None,
            cancel_at_period_end: false,
            updated_at: None,
        };
        SubscriptionRepository::new(db).upsert(&subscription).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_usage_limit_absent_row() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/usage_limits");
                then.status(200).json_body(json!([]));
            })
            .await;

        let db = Arc::new(Database::with_credentials(&server.base_url(), "key", 5).unwrap());
        let limit = SubscriptionRepository::new(db).usage_limit("u1").await.unwrap();

        assert!(limit.is_none());
    }
}
