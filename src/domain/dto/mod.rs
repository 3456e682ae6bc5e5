//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 요청/응답 타입입니다.
//!
//! - 결제(`billing`) 요청/응답은 프론트엔드가 보내는 그대로 camelCase를 사용합니다.
//! - 대시보드/관리자 응답은 [`common::ApiResponse`] 봉투(`{"data", "error"}`)로 감쌉니다.

pub mod common;
pub mod billing;
pub mod stats;
pub mod admin;
pub mod conversions;
pub mod tokens;

pub use common::*;
