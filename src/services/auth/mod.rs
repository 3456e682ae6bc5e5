//! 인증 서비스 모듈
//!
//! - [`TokenService`]: 대시보드 사용자 JWT 검증 (인증 미들웨어에서 사용)
//! - [`LoginTokenService`]: 결제 완료 후 일회용 로그인 토큰 발급/교환

pub mod token_service;
pub mod login_token_service;

pub use token_service::TokenService;
pub use login_token_service::LoginTokenService;
