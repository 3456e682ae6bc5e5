//! Referral Entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `referrals` 테이블 행
///
/// 미전환(`converted = false`) 행이 있으면 그 코드가 사용자의 현재 추천 코드입니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Referral {
    pub id: String,
    pub referrer_id: String,
    pub code: String,
    #[serde(default)]
    pub referred_user_id: Option<String>,
    #[serde(default)]
    pub referred_email: Option<String>,
    #[serde(default)]
    pub converted: bool,
    #[serde(default)]
    pub converted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// 새 추천 코드 삽입용
#[derive(Debug, Clone, Serialize)]
pub struct NewReferral {
    pub referrer_id: String,
    pub code: String,
    pub converted: bool,
}

impl NewReferral {
    pub fn new(referrer_id: &str, code: &str) -> Self {
        Self {
            referrer_id: referrer_id.to_string(),
            code: code.to_string(),
            converted: false,
        }
    }
}
