//! 호스티드 Auth API
//!
//! 서비스 롤 키로 호출하는 관리자 작업(사용자 생성/삭제)과
//! 저장된 자격 증명으로 세션을 발급받는 비밀번호 그랜트를 제공합니다.

use crate::db::{upstream_message, Database};
use crate::domain::models::auth::{AuthSession, AuthUser, NewAuthUser};
use crate::errors::errors::AppError;

impl Database {
    /// `POST /auth/v1/admin/users`
    ///
    /// 이미 가입된 이메일이면 `None`.
    pub async fn create_auth_user(&self, user: &NewAuthUser) -> Result<Option<AuthUser>, AppError> {
        let response = self
            .authorized(self.http().post(self.auth_url("admin/users")))
            .json(user)
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Auth 사용자 생성 요청 실패: {}", e)))?;

        let status = response.status().as_u16();
        if status == 409 || status == 422 {
            let body = response.text().await.unwrap_or_default();
            if is_email_taken(&body) {
                log::info!("이미 가입된 이메일: {}", user.email);
                return Ok(None);
            }
            return Err(AppError::DatabaseError(format!(
                "Auth 사용자 생성 실패 ({}): {}",
                status,
                upstream_message(&body)
            )));
        }

        let created: AuthUser = Self::read_json(response, "Auth 사용자 생성").await?;
        log::info!("Auth 사용자 생성: {}", created.id);
        Ok(Some(created))
    }

    /// `DELETE /auth/v1/admin/users/{id}`
    pub async fn delete_auth_user(&self, user_id: &str) -> Result<(), AppError> {
        let url = self.auth_url(&format!("admin/users/{}", urlencoding::encode(user_id)));
        let response = self
            .authorized(self.http().delete(url))
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Auth 사용자 삭제 요청 실패: {}", e)))?;

        Self::ensure_success(response, "Auth 사용자 삭제").await?;
        Ok(())
    }

    /// `POST /auth/v1/token?grant_type=password`
    ///
    /// 자격 증명이 틀리면(400/401) `AuthenticationError`, 그 외 실패는 `DatabaseError`.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let response = self
            .authorized(self.http().post(self.auth_url("token?grant_type=password")))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("로그인 요청 실패: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 400 || status.as_u16() == 401 {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AuthenticationError(upstream_message(&body)));
        }

        Self::read_json(response, "로그인").await
    }
}

fn is_email_taken(body: &str) -> bool {
    let body = body.to_lowercase();
    body.contains("email_exists") || body.contains("already been registered") || body.contains("already registered")
}
