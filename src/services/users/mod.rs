//! 관리자 사용자 관리 서비스 모듈

pub mod admin_user_service;

pub use admin_user_service::AdminUserService;
