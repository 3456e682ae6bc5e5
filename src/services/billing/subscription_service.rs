//! 대시보드 구독 조회

use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::domain::dto::billing::SubscriptionOverview;
use crate::errors::errors::AppError;
use crate::repositories::billing::SubscriptionRepository;

pub struct SubscriptionService {
    subscriptions: Arc<SubscriptionRepository>,
}

static SUBSCRIPTION_SERVICE_INSTANCE: OnceCell<Arc<SubscriptionService>> = OnceCell::new();

impl SubscriptionService {
    pub fn new(subscriptions: Arc<SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    pub fn instance() -> Arc<Self> {
        SUBSCRIPTION_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(SubscriptionRepository::instance())))
            .clone()
    }

    /// 구독 행이 없으면 `subscription: null`과 빈 결제 목록
    pub async fn overview(&self, user_id: &str) -> Result<SubscriptionOverview, AppError> {
        let subscription = self.subscriptions.find_by_user(user_id).await?;
        let payments = self.subscriptions.payments_for_user(user_id).await?;

        Ok(SubscriptionOverview { subscription, payments })
    }
}

fn subscription_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(SubscriptionService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "subscription_service",
        constructor: subscription_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;
    use crate::db::Database;

    #[tokio::test]
    async fn test_overview_without_subscription() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/subscriptions").query_param("user_id", "eq.u1");
                then.status(200).json_body(json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/subscription_payments").query_param("user_id", "eq.u1");
                then.status(200).json_body(json!([
                    {"user_id": "u1", "stripe_session_id": "cs_1", "amount_total": 4900, "currency": "usd"}
                ]));
            })
            .await;

        let db = Arc::new(Database::with_credentials(&server.base_url(), "key", 5).unwrap());
        let service = SubscriptionService::new(Arc::new(SubscriptionRepository::new(db)));

        let overview = service.overview("u1").await.unwrap();

        assert!(overview.subscription.is_none());
        assert_eq!(overview.payments.len(), 1);
        assert_eq!(overview.payments[0].amount_total, Some(4900));
    }
}
