//! 체크아웃 세션 기록과 결제 전 임시 사용자

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `checkout_sessions.status` 값
pub const CHECKOUT_PENDING: &str = "pending";
pub const CHECKOUT_COMPLETED: &str = "completed";

/// 결제 완료 후 로그인 교환에 쓰이는 자격 증명 (`checkout_sessions.user_data`)
///
/// 임시 사용자에게서 옮겨온 비밀번호가 그대로 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredCredentials {
    pub email: String,
    pub password: String,
}

/// `checkout_sessions` 테이블 행
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutSessionRecord {
    pub session_id: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub plan_name: Option<String>,
    #[serde(default)]
    pub price_id: Option<String>,
    #[serde(default)]
    pub temp_user_id: Option<String>,
    /// 결제한 사용자 ID. 임시 사용자는 웹훅에서 승격된 뒤 기록됩니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub user_data: Option<StoredCredentials>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `temp_users` 테이블 행. 가입 폼 작성 후 결제 완료 전까지 보관됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TempUser {
    pub id: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
