//! JWT 클레임 타입
//!
//! - [`UserClaims`]: 호스티드 Auth가 발급한 대시보드 액세스 토큰 (HS256)
//! - [`LoginTokenClaims`]: 결제 완료 후 한 번만 쓰는 로그인 토큰 (HS256)

use serde::{Deserialize, Serialize};

/// 로그인 토큰의 `purpose` 클레임 값
pub const CHECKOUT_LOGIN_PURPOSE: &str = "checkout_login";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppMetadata {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// 대시보드 액세스 토큰 클레임
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserClaims {
    /// 사용자 ID
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Auth 롤 (`authenticated` 등). 앱 역할과는 별개입니다.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// 일회용 로그인 토큰 클레임
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginTokenClaims {
    /// 체크아웃 세션 ID
    pub sub: String,
    /// 토큰 고유 ID (재사용 방지 키)
    pub jti: String,
    pub purpose: String,
    pub iat: i64,
    pub exp: i64,
}
