//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer` 헤더에서 대시보드 JWT 추출 및 검증
//! - 사용자 정보를 request extension에 저장
//! - 필수/선택 인증 모드, 역할 요구 지원
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::scope("/api/v1/admin")
//!     .wrap(AuthMiddleware::required_with_role("admin"))
//!     .service(list_users);
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
