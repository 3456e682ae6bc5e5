use crate::domain::entities::billing::{Subscription, SubscriptionPayment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionCreated {
    pub session_id: String,
    pub url: Option<String>,
}

/// 결제 완료 페이지가 조회하는 세션 상태
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionStatus {
    pub session_id: String,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub customer_email: Option<String>,
    pub plan_name: Option<String>,
    /// 결제 완료 시에만 발급
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortalSessionCreated {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookAck {
    pub received: bool,
}

/// 대시보드의 현재 구독과 결제 내역
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionOverview {
    pub subscription: Option<Subscription>,
    pub payments: Vec<SubscriptionPayment>,
}
