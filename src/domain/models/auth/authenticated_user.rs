use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::errors::errors::AppError;

/// 대시보드 JWT에서 추출된 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID (Auth 사용자 ID)
    pub user_id: String,

    /// 토큰에 포함된 이메일
    pub email: Option<String>,

    /// 사용자 역할 목록 (`app_metadata.roles`)
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// 특정 역할을 보유하고 있는지 확인
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// 관리자 권한을 보유하고 있는지 확인
    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 인증 미들웨어가 Request Extensions에 넣어 둔 사용자를 꺼냅니다.
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string()
            ).into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "test_id".to_string(),
            email: Some("test@example.com".to_string()),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_authenticated_user_has_role() {
        let user = user_with(&["user", "admin"]);

        assert!(user.has_role("admin"));
        assert!(user.has_role("user"));
        assert!(!user.has_role("moderator"));
        assert!(user.is_admin());
    }

    #[test]
    fn test_user_without_roles_is_not_admin() {
        let user = user_with(&[]);

        assert!(!user.has_role("user"));
        assert!(!user.is_admin());
    }
}
