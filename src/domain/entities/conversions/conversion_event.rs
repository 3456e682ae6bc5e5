use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 결제 완료 시 기록되는 이벤트 타입
pub const SUBSCRIPTION_STARTED: &str = "subscription_started";

/// `conversion_events` 테이블 행
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversionEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub event_type: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ConversionEvent {
    pub fn new(event_type: &str, source: Option<String>, user_id: Option<String>, metadata: Option<serde_json::Value>) -> Self {
        Self {
            id: None,
            event_type: event_type.to_string(),
            source,
            user_id,
            metadata,
            created_at: None,
        }
    }
}
