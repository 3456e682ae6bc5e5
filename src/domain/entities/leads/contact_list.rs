//! 연락처 리스트 관련 행 타입 (`lists`, `list_profiles`, `campaign_profiles`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `lists` 테이블 행. 사용자가 만든 Instagram 프로필 묶음입니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactList {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `list_profiles` 테이블 행
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListProfile {
    pub id: String,
    pub list_id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `campaign_profiles` 테이블 행. 리스트와 연락 대상 프로필의 연결입니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CampaignProfile {
    pub id: String,
    pub list_id: String,
    pub profile_id: String,
    #[serde(default)]
    pub status: Option<String>,
}
