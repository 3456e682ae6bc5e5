use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `messages` 테이블 행
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub user_id: String,
    pub profile_id: String,
    /// 자유 형식 문자열. 퍼널 단계 이름과 일치하지 않을 수 있습니다.
    pub message_type: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
