//! 에러 타입 모듈
//!
//! [`errors::AppError`]와 `AppResult` 별칭을 제공합니다.

pub mod errors;

pub use errors::*;
