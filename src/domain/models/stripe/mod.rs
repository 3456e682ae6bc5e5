//! 결제 프로바이더(Stripe) REST API 객체
//!
//! 이 서비스가 읽는 필드만 선언합니다. 알 수 없는 필드는 무시됩니다.

pub mod objects;
pub mod event;

pub use objects::*;
pub use event::*;
