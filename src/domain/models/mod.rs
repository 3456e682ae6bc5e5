//! # Domain Models Module
//!
//! 테이블 행이 아닌 값 객체와 외부 시스템 통합 모델입니다.
//!
//! ```text
//! models/
//! ├── auth/     ← 인증된 사용자, 인증 모드/역할 요구, JWT 클레임, Auth 세션
//! └── stripe/   ← 결제 프로바이더 객체와 웹훅 이벤트
//! ```

pub mod auth;
pub mod stripe;
