//! 일회용 토큰 사용 기록
//!
//! 토큰 ID(`jti`)를 처음 사용할 때 원자적으로 기록하고, 두 번째 사용은 거부합니다.

use async_trait::async_trait;
use crate::caching::redis::RedisClient;
use crate::errors::errors::AppError;

const CONSUMED_KEY_PREFIX: &str = "login_token:consumed:";

#[async_trait]
pub trait ConsumedTokenStore: Send + Sync {
    /// 처음 사용이면 `true`. 기록은 `ttl_secs` 후 만료됩니다.
    async fn mark_consumed(&self, token_id: &str, ttl_secs: u64) -> Result<bool, AppError>;

    /// 교환이 끝나지 못했을 때 기록을 지워 같은 토큰을 다시 쓸 수 있게 합니다.
    async fn release(&self, token_id: &str) -> Result<(), AppError>;
}

#[async_trait]
impl ConsumedTokenStore for RedisClient {
    async fn mark_consumed(&self, token_id: &str, ttl_secs: u64) -> Result<bool, AppError> {
        let key = format!("{}{}", CONSUMED_KEY_PREFIX, token_id);
        Ok(self.set_nx_with_expiry(&key, "1", ttl_secs.max(1)).await?)
    }

    async fn release(&self, token_id: &str) -> Result<(), AppError> {
        Ok(self.del(&format!("{}{}", CONSUMED_KEY_PREFIX, token_id)).await?)
    }
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashSet;
    use std::sync::Mutex;
    use super::*;

    /// 테스트용 인메모리 기록
    #[derive(Default)]
    pub struct MemoryTokenLedger {
        consumed: Mutex<HashSet<String>>,
    }

    #[async_trait]
    impl ConsumedTokenStore for MemoryTokenLedger {
        async fn mark_consumed(&self, token_id: &str, _ttl_secs: u64) -> Result<bool, AppError> {
            let mut consumed = self.consumed.lock().unwrap();
            Ok(consumed.insert(token_id.to_string()))
        }

        async fn release(&self, token_id: &str) -> Result<(), AppError> {
            self.consumed.lock().unwrap().remove(token_id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_second_use_is_rejected() {
        let ledger = MemoryTokenLedger::default();

        assert!(ledger.mark_consumed("jti-1", 60).await.unwrap());
        assert!(!ledger.mark_consumed("jti-1", 60).await.unwrap());
        assert!(ledger.mark_consumed("jti-2", 60).await.unwrap());
    }

    #[tokio::test]
    async fn test_released_token_can_be_consumed_again() {
        let ledger = MemoryTokenLedger::default();

        assert!(ledger.mark_consumed("jti-1", 60).await.unwrap());
        ledger.release("jti-1").await.unwrap();
        assert!(ledger.mark_consumed("jti-1", 60).await.unwrap());
    }
}
