//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 호스티드 백엔드, 결제 프로바이더, Redis, 입력값 검증에서 발생하는 에러를
//! 하나의 열거형으로 모읍니다. `actix_web::ResponseError` 구현을 통해
//! `{"data": null, "error": "..."}` 형태의 응답으로 자동 변환됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::AppError;
//!
//! fn require_email(email: &str) -> Result<(), AppError> {
//!     if email.trim().is_empty() {
//!         return Err(AppError::ValidationError("customerEmail은(는) 필수입니다".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 에러의 출처(호스티드 백엔드 / 결제 프로바이더 / 검증 실패)만 구분하며
/// 재시도 없이 호출자에게 한 번 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 호스티드 백엔드(데이터베이스/인증) 에러 (500)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 결제 프로바이더 에러 (500)
    #[error("Payment provider error: {0}")]
    PaymentProviderError(String),

    /// Redis 에러 (500)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음 (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 인증 실패 (401)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 (403)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 내부 서버 에러 (500)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 클라이언트에 노출할 메시지 (variant 접두어 없이 원본 메시지)
    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(msg)
            | AppError::PaymentProviderError(msg)
            | AppError::RedisError(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::InternalError(msg) => msg,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패 ({}): {}", status.as_u16(), self);
        } else {
            log::warn!("요청 거부 ({}): {}", status.as_u16(), self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "data": serde_json::Value::Null,
            "error": self.message()
        }))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 문맥 메시지를 덧붙여 `AppError::InternalError`로 변환합니다.
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
