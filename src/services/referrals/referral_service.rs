//! # 추천 코드 서비스
//!
//! 사용자당 미전환 코드 하나를 재사용하고, 없을 때만 새 코드를 발급합니다.
//! 같은 사용자의 동시 요청은 코드를 두 개 만들 수 있습니다. 이후 조회는 가장 오래된 코드를 반환합니다.

use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::domain::dto::stats::ReferralStats;
use crate::domain::entities::referrals::{NewReferral, Referral};
use crate::errors::errors::AppError;
use crate::repositories::referrals::ReferralRepository;
use crate::services::stats::funnel::percentage;

pub fn referral_stats(referrals: &[Referral]) -> ReferralStats {
    let total = referrals.len() as u64;
    let converted = referrals.iter().filter(|r| r.converted).count() as u64;

    ReferralStats {
        total,
        converted,
        pending: total - converted,
        conversion_rate: percentage(converted, total),
    }
}

pub struct ReferralService {
    referrals: Arc<ReferralRepository>,
}

static REFERRAL_SERVICE_INSTANCE: OnceCell<Arc<ReferralService>> = OnceCell::new();

impl ReferralService {
    pub fn new(referrals: Arc<ReferralRepository>) -> Self {
        Self { referrals }
    }

    pub fn instance() -> Arc<Self> {
        REFERRAL_SERVICE_INSTANCE
            .get_or_init(|| Arc::new(Self::new(ReferralRepository::instance())))
            .clone()
    }

    pub async fn get_or_create_code(&self, user_id: &str) -> Result<String, AppError> {
        if let Some(existing) = self.referrals.find_open_by_referrer(user_id).await? {
            return Ok(existing.code);
        }

        let code = self.referrals.generate_code().await?;
        let created = self.referrals.create(&NewReferral::new(user_id, &code)).await?;

        log::info!("추천 코드 발급: 사용자 {} → {}", user_id, created.code);
        Ok(created.code)
    }

    pub async fn stats_for_user(&self, user_id: &str) -> Result<ReferralStats, AppError> {
        let referrals = self.referrals.find_by_referrer(user_id).await?;
        Ok(referral_stats(&referrals))
    }

    /// 추천 코드가 사용된 이메일을 기록합니다. 알 수 없는 코드는 404.
    pub async fn track_referral(&self, code: &str, email: &str) -> Result<(), AppError> {
        if self.referrals.find_by_code(code).await?.is_none() {
            return Err(AppError::NotFound(format!("추천 코드를 찾을 수 없습니다: {}", code)));
        }

        self.referrals.set_referred_email(code, email).await?;
        log::info!("추천 코드 사용 기록: {}", code);
        Ok(())
    }

    /// 결제 완료된 추천을 전환 처리합니다. 이미 전환된 코드면 아무것도 바꾸지 않습니다.
    pub async fn mark_converted(&self, code: &str, referred_user_id: Option<&str>) -> Result<(), AppError> {
        let updated = self.referrals.mark_converted(code, referred_user_id).await?;
        if updated == 0 {
            log::warn!("전환 처리할 추천 코드가 없습니다: {}", code);
        } else {
            log::info!("추천 전환 처리: {}", code);
        }
        Ok(())
    }
}

fn referral_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(ReferralService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "referral_service",
        constructor: referral_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use httpmock::prelude::*;
    use serde_json::json;

    fn service(server: &MockServer) -> ReferralService {
        let db = Arc::new(Database::with_credentials(&server.base_url(), "key", 5).unwrap());
        ReferralService::new(Arc::new(ReferralRepository::new(db)))
    }

    #[tokio::test]
    async fn test_existing_open_code_is_reused() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/referrals")
                    .query_param("referrer_id", "eq.u1")
                    .query_param("converted", "eq.false");
                then.status(200).json_body(json!([
                    {"id": "r1", "referrer_id": "u1", "code": "AB12CD34", "converted": false}
                ]));
            })
            .await;
        let rpc = server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/rpc/generate_referral_code");
                then.status(200).json_body(json!("NEWCODE1"));
            })
            .await;

        let service = service(&server);
        let first = service.get_or_create_code("u1").await.unwrap();
        let second = service.get_or_create_code("u1").await.unwrap();

        assert_eq!(first, "AB12CD34");
        assert_eq!(first, second);
        assert_eq!(rpc.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_new_code_is_generated_and_inserted() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/referrals");
                then.status(200).json_body(json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/rpc/generate_referral_code");
                then.status(200).json_body(json!("XY98ZW76"));
            })
            .await;
        let insert = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/referrals")
                    .json_body(json!({"referrer_id": "u1", "code": "XY98ZW76", "converted": false}));
                then.status(201).json_body(json!([
                    {"id": "r2", "referrer_id": "u1", "code": "XY98ZW76", "converted": false}
                ]));
            })
            .await;

        let code = service(&server).get_or_create_code("u1").await.unwrap();

        insert.assert_async().await;
        assert_eq!(code, "XY98ZW76");
    }

    #[tokio::test]
    async fn test_track_unknown_code_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/referrals").query_param("code", "eq.NOPE");
                then.status(200).json_body(json!([]));
            })
            .await;

        let result = service(&server).track_referral("NOPE", "lead@example.com").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_referral_stats() {
        let referral = |converted: bool| Referral {
            id: "r".to_string(),
            referrer_id: "u1".to_string(),
            code: "C".to_string(),
            referred_user_id: None,
            referred_email: None,
            converted,
            converted_at: None,
            created_at: None,
        };

        let stats = referral_stats(&[referral(true), referral(false), referral(false), referral(true)]);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.converted, 2);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.conversion_rate, 50.0);
        assert_eq!(referral_stats(&[]).conversion_rate, 0.0);
    }
}
