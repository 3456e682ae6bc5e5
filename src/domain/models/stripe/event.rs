use serde::{Deserialize, Serialize};

pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";
pub const SUBSCRIPTION_UPDATED: &str = "customer.subscription.updated";
pub const SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";

/// 웹훅 이벤트
///
/// `data.object`의 모양은 `type`에 따라 달라지므로 원본 JSON으로 보관합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub created: Option<i64>,
    pub data: EventData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    pub object: serde_json::Value,
}

impl Event {
    /// `data.object`를 구체 타입으로 변환합니다.
    pub fn object<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.data.object)
    }
}
