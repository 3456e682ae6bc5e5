//! 캐싱 계층 모듈
//!
//! Redis 클라이언트와 그 위의 일회용 토큰 사용 기록을 제공합니다.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
pub mod token_ledger;

pub use token_ledger::ConsumedTokenStore;
