//! 사용량 대비 한도 계산

use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::domain::dto::stats::{UsageMetric, UsageSummary};
use crate::domain::entities::billing::UsageLimit;
use crate::errors::errors::AppError;
use crate::repositories::billing::SubscriptionRepository;
use crate::repositories::leads::{ListRepository, MessageRepository};

/// 한도 대비 사용률. 100으로 제한하며 한도가 0이면 0입니다.
pub fn usage_metric(used: u64, limit: u64) -> UsageMetric {
    let percentage = if limit == 0 {
        0.0
    } else {
        (used as f64 / limit as f64 * 100.0).min(100.0)
    };

    UsageMetric { used, limit, percentage }
}

pub fn compute_usage(lists: u64, profiles: u64, messages: u64, limit: UsageLimit) -> UsageSummary {
    UsageSummary {
        lists: usage_metric(lists, limit.max_lists),
        profiles: usage_metric(profiles, limit.max_profiles),
        messages: usage_metric(messages, limit.max_messages),
    }
}

pub struct UsageService {
    lists: Arc<ListRepository>,
    messages: Arc<MessageRepository>,
    subscriptions: Arc<SubscriptionRepository>,
}

static USAGE_SERVICE_INSTANCE: OnceCell<Arc<UsageService>> = OnceCell::new();

impl UsageService {
    pub fn new(
        lists: Arc<ListRepository>,
        messages: Arc<MessageRepository>,
        subscriptions: Arc<SubscriptionRepository>,
    ) -> Self {
        Self { lists, messages, subscriptions }
    }

    pub fn instance() -> Arc<Self> {
        USAGE_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    ListRepository::instance(),
                    MessageRepository::instance(),
                    SubscriptionRepository::instance(),
                ))
            })
            .clone()
    }

    /// 한도 행이 없으면 기본 한도(5/1000/500)를 사용합니다.
    pub async fn usage_for_user(&self, user_id: &str) -> Result<UsageSummary, AppError> {
        let lists = self.lists.find_by_user(user_id).await?;
        let list_ids: Vec<String> = lists.iter().map(|l| l.id.clone()).collect();

        let profile_count = self.lists.count_list_profiles(&list_ids).await?;
        let message_count = self.messages.count_by_user(user_id).await?;
        let limit = self.subscriptions.usage_limit(user_id).await?.unwrap_or_default();

        Ok(compute_usage(lists.len() as u64, profile_count, message_count, limit))
    }
}

fn usage_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(UsageService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "usage_service",
        constructor: usage_service_constructor,
    }
}
