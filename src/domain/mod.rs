//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 호스티드 백엔드 테이블 행
//! ├── dto       - HTTP 요청/응답
//! └── models    - 인증 값 객체, 결제 프로바이더 객체
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db)
//! ```

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use models::*;
