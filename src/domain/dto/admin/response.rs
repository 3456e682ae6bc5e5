use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 관리자 사용자 목록의 한 행
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUserSummary {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub roles: Vec<String>,
    pub subscription_status: Option<String>,
    pub plan_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleAssigned {
    pub user_id: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDeleted {
    pub user_id: String,
}
