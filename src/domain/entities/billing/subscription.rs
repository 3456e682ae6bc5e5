//! 구독/결제/사용량 한도 행 타입

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `subscriptions` 테이블 행 (사용자당 1행, `user_id` 기준 업서트)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default)]
    pub stripe_customer_id: Option<String>,
    #[serde(default)]
    pub stripe_subscription_id: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub price_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancel_at_period_end: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 구독 이벤트로 변경되는 컬럼만 담는 부분 수정 본문
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct SubscriptionChanges {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_at_period_end: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// `subscription_payments` 테이블 행
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionPayment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    pub stripe_session_id: String,
    /// 최소 통화 단위 (센트)
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// `usage_limits` 테이블 행
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageLimit {
    pub max_lists: u64,
    pub max_profiles: u64,
    pub max_messages: u64,
}

impl Default for UsageLimit {
    /// 한도 행이 없는 사용자의 기본값
    fn default() -> Self {
        Self {
            max_lists: 5,
            max_profiles: 1000,
            max_messages: 500,
        }
    }
}
