use serde::{Deserialize, Serialize};

/// 호스티드 Auth 사용자 (Admin API / 토큰 응답의 `user`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: serde_json::Value,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

/// 비밀번호 그랜트로 발급된 세션
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
    pub user: AuthUser,
}

/// Admin API 사용자 생성 본문
#[derive(Debug, Clone, Serialize)]
pub struct NewAuthUser {
    pub email: String,
    pub password: String,
    pub email_confirm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<serde_json::Value>,
}
