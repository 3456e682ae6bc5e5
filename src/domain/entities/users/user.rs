//! User Entity Implementation
//!
//! 대시보드 사용자와 관련된 세 테이블(`users`, `profiles`, `user_roles`)의 행 타입입니다.
//! 인증 계정 자체는 호스티드 Auth가 소유하며 `users.id`가 Auth 사용자 ID와 같습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `users` 테이블 행
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// 결제 프로바이더 고객 ID (체크아웃 시 기록)
    #[serde(default)]
    pub stripe_customer_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `profiles` 테이블 행 (`id` = 사용자 ID)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `user_roles` 테이블 행
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRole {
    pub user_id: String,
    pub role: String,
}

/// 관리자가 부여할 수 있는 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// `user`/`admin` 외의 값은 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse(" User "), Some(Role::User));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_user_row_with_missing_optional_columns() {
        let user: User = serde_json::from_str(r#"{"id":"u1","email":"a@b.com"}"#).unwrap();

        assert_eq!(user.id, "u1");
        assert!(user.stripe_customer_id.is_none());
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_user_row_parses_backend_timestamp() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","email":"a@b.com","full_name":"Ann","stripe_customer_id":"cus_1","created_at":"2024-03-01T10:20:30.123456+00:00"}"#,
        )
        .unwrap();

        assert_eq!(user.stripe_customer_id.as_deref(), Some("cus_1"));
        assert!(user.created_at.is_some());
    }
}
