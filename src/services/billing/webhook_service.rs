//! # 결제 웹훅 처리
//!
//! 서명 검증이 끝나기 전에는 본문을 해석하지 않으며 어떤 쓰기도 하지 않습니다.
//!
//! | 이벤트 | 처리 |
//! |---|---|
//! | `checkout.session.completed` | 임시 사용자 승격, 구독 업서트, 결제 기록, 전환 이벤트, 추천 전환, 세션 완료 표시 |
//! | `customer.subscription.updated` | 구독 상태/기간/가격 갱신 |
//! | `customer.subscription.deleted` | 구독 상태 `canceled` |
//! | 그 외 | 무시하고 수신 확인 |
//!
//! 이벤트 ID 중복 처리는 하지 않습니다. 재전송된 이벤트는 같은 값으로 다시 덮어씁니다.
//!
//! 체크아웃 완료는 중간에 실패해도 재전송으로 끝까지 진행됩니다.
//! - 승격된 사용자 ID는 자격 증명과 함께 세션 행에 먼저 기록하고 임시 행은 마지막에 지웁니다.
//! - Auth에 이미 가입된 이메일이면 `users`에서 기존 사용자를 찾아 이어갑니다.
//! - 결제 기록은 세션 ID로 업서트하고, 세션 완료 표시는 마지막 단계입니다.
//!   이미 완료된 세션이면 전환 이벤트를 다시 남기지 않습니다.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde_json::json;
use crate::config::StripeConfig;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::dto::billing::WebhookAck;
use crate::domain::entities::billing::checkout::CHECKOUT_COMPLETED;
use crate::domain::entities::billing::{StoredCredentials, Subscription, SubscriptionChanges, SubscriptionPayment};
use crate::domain::entities::conversions::{ConversionEvent, SUBSCRIPTION_STARTED};
use crate::domain::models::auth::NewAuthUser;
use crate::domain::models::stripe::{
    CheckoutSession, Event, StripeSubscription, CHECKOUT_SESSION_COMPLETED, SUBSCRIPTION_DELETED,
    SUBSCRIPTION_UPDATED,
};
use crate::errors::errors::AppError;
use crate::repositories::billing::{CheckoutRepository, SubscriptionRepository};
use crate::repositories::users::UserRepository;
use crate::services::billing::webhook_signature::verify_signature;
use crate::services::referrals::ReferralService;
use crate::services::stats::ConversionService;

const STATUS_ACTIVE: &str = "active";
const STATUS_CANCELED: &str = "canceled";

pub struct WebhookService {
    db: Arc<Database>,
    users: Arc<UserRepository>,
    checkouts: Arc<CheckoutRepository>,
    subscriptions: Arc<SubscriptionRepository>,
    referrals: Arc<ReferralService>,
    conversions: Arc<ConversionService>,
    webhook_secret: String,
    tolerance_secs: i64,
}

static WEBHOOK_SERVICE_INSTANCE: OnceCell<Arc<WebhookService>> = OnceCell::new();

impl WebhookService {
    pub fn new(
        db: Arc<Database>,
        users: Arc<UserRepository>,
        checkouts: Arc<CheckoutRepository>,
        subscriptions: Arc<SubscriptionRepository>,
        referrals: Arc<ReferralService>,
        conversions: Arc<ConversionService>,
        webhook_secret: String,
        tolerance_secs: i64,
    ) -> Self {
        Self {
            db,
            users,
            checkouts,
            subscriptions,
            referrals,
            conversions,
            webhook_secret,
            tolerance_secs,
        }
    }

    pub fn instance() -> Arc<Self> {
        WEBHOOK_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    ServiceLocator::get::<Database>(),
                    UserRepository::instance(),
                    CheckoutRepository::instance(),
                    SubscriptionRepository::instance(),
                    ReferralService::instance(),
                    ConversionService::instance(),
                    StripeConfig::webhook_secret(),
                    StripeConfig::signature_tolerance_secs(),
                ))
            })
            .clone()
    }

    /// 원본 본문과 `Stripe-Signature` 헤더로 이벤트를 검증하고 처리합니다.
    pub async fn handle(&self, payload: &[u8], signature: Option<&str>) -> Result<WebhookAck, AppError> {
        verify_signature(
            payload,
            signature,
            &self.webhook_secret,
            self.tolerance_secs,
            Utc::now().timestamp(),
        )?;

        let event: Event = serde_json::from_slice(payload)
            .map_err(|e| AppError::ValidationError(format!("웹훅 본문 파싱 실패: {}", e)))?;

        log::info!("웹훅 수신: {} ({})", event.event_type, event.id);

        match event.event_type.as_str() {
            CHECKOUT_SESSION_COMPLETED => self.on_checkout_completed(&event).await?,
            SUBSCRIPTION_UPDATED => self.on_subscription_changed(&event, false).await?,
            SUBSCRIPTION_DELETED => self.on_subscription_changed(&event, true).await?,
            other => log::debug!("처리하지 않는 웹훅 이벤트: {}", other),
        }

        Ok(WebhookAck { received: true })
    }

    async fn on_checkout_completed(&self, event: &Event) -> Result<(), AppError> {
        let session: CheckoutSession = event
            .object()
            .map_err(|e| AppError::ValidationError(format!("체크아웃 세션 파싱 실패: {}", e)))?;

        let record = self.checkouts.find_session(&session.id).await?;
        let already_completed = record.as_ref().is_some_and(|r| r.status == CHECKOUT_COMPLETED);
        let promoted = record.and_then(|r| r.user_id);

        let mut user_id = session.metadata_value("user_id").map(str::to_string);
        if let Some(temp_user_id) = session.metadata_value("temp_user_id") {
            let promoted = self.promote_temp_user(&session.id, temp_user_id, promoted).await?;
            user_id = user_id.or(promoted);
        }

        let plan_name = session.metadata_value("plan_name").map(str::to_string);

        match user_id.as_deref() {
            Some(user_id) => {
                self.subscriptions
                    .upsert(&Subscription {
                        id: None,
                        user_id: user_id.to_string(),
                        stripe_customer_id: session.customer.clone(),
                        stripe_subscription_id: session.subscription.clone(),
                        plan_name: plan_name.clone(),
                        price_id: None,
                        status: STATUS_ACTIVE.to_string(),
                        current_period_end: None,
                        cancel_at_period_end: false,
                        updated_at: Some(Utc::now()),
                    })
                    .await?;

                self.subscriptions
                    .record_payment(&SubscriptionPayment {
                        id: None,
                        user_id: user_id.to_string(),
                        stripe_session_id: session.id.clone(),
                        amount_total: session.amount_total,
                        currency: session.currency.clone(),
                        created_at: None,
                    })
                    .await?;
            }
            None => log::warn!("사용자를 알 수 없는 체크아웃 세션: {}", session.id),
        }

        if already_completed {
            log::info!("이미 완료된 체크아웃 재전송: {}", session.id);
        } else {
            self.conversions
                .record(&ConversionEvent::new(
                    SUBSCRIPTION_STARTED,
                    Some("stripe".to_string()),
                    user_id.clone(),
                    Some(json!({
                        "session_id": session.id,
                        "plan_name": plan_name,
                        "amount_total": session.amount_total,
                    })),
                ))
                .await?;
        }

        if let Some(code) = session.metadata_value("referral_code") {
            self.referrals.mark_converted(code, user_id.as_deref()).await?;
        }

        self.checkouts.mark_completed(&session.id).await?;

        log::info!("체크아웃 완료 처리: {}", session.id);
        Ok(())
    }

    /// 임시 사용자를 Auth 사용자로 승격하고 로그인 교환용 자격 증명을 세션에 옮깁니다.
    ///
    /// `promoted`는 이전 전송에서 세션 행에 기록된 사용자 ID입니다. 있으면 남은 임시 행만
    /// 지웁니다. 임시 행도 기록도 없으면 `None`.
    async fn promote_temp_user(
        &self,
        session_id: &str,
        temp_user_id: &str,
        promoted: Option<String>,
    ) -> Result<Option<String>, AppError> {
        if let Some(user_id) = promoted {
            self.checkouts.delete_temp_user(temp_user_id).await?;
            return Ok(Some(user_id));
        }

        let Some(temp) = self.checkouts.find_temp_user(temp_user_id).await? else {
            log::warn!("임시 사용자를 찾을 수 없습니다: {}", temp_user_id);
            return Ok(None);
        };

        let created = self
            .db
            .create_auth_user(&NewAuthUser {
                email: temp.email.clone(),
                password: temp.password.clone(),
                email_confirm: true,
                user_metadata: temp.full_name.as_ref().map(|name| json!({ "full_name": name })),
            })
            .await?;

        let user_id = match created {
            Some(user) => user.id,
            None => self
                .users
                .find_by_email(&temp.email)
                .await?
                .map(|user| user.id)
                .ok_or_else(|| {
                    AppError::DatabaseError(format!("가입된 이메일의 사용자 행이 없습니다: {}", temp.email))
                })?,
        };

        self.checkouts
            .store_promotion(
                session_id,
                &user_id,
                &StoredCredentials {
                    email: temp.email,
                    password: temp.password,
                },
            )
            .await?;
        self.checkouts.delete_temp_user(temp_user_id).await?;

        log::info!("임시 사용자 승격: {} → {}", temp_user_id, user_id);
        Ok(Some(user_id))
    }

    async fn on_subscription_changed(&self, event: &Event, deleted: bool) -> Result<(), AppError> {
        let subscription: StripeSubscription = event
            .object()
            .map_err(|e| AppError::ValidationError(format!("구독 파싱 실패: {}", e)))?;

        let changes = if deleted {
            SubscriptionChanges {
                status: STATUS_CANCELED.to_string(),
                updated_at: Utc::now(),
                ..Default::default()
            }
        } else {
            SubscriptionChanges {
                status: subscription.status.clone(),
                current_period_end: subscription
                    .current_period_end
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
                cancel_at_period_end: Some(subscription.cancel_at_period_end),
                price_id: subscription.price_id().map(str::to_string),
                updated_at: Utc::now(),
            }
        };

        let updated = self.subscriptions.update_by_stripe_id(&subscription.id, &changes).await?;
        if updated == 0 {
            log::warn!("갱신할 구독 행이 없습니다: {}", subscription.id);
        } else {
            log::info!("구독 갱신: {} → {}", subscription.id, changes.status);
        }
        Ok(())
    }
}

fn webhook_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(WebhookService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "webhook_service",
        constructor: webhook_service_constructor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use crate::repositories::conversions::ConversionRepository;
    use crate::repositories::referrals::ReferralRepository;
    use crate::services::billing::webhook_signature::sign_payload;

    const SECRET: &str = "whsec_test";

    fn service_for(server: &MockServer) -> WebhookService {
        let db = Arc::new(Database::with_credentials(&server.base_url(), "service-key", 5).unwrap());
        WebhookService::new(
            db.clone(),
            Arc::new(UserRepository::new(db.clone())),
            Arc::new(CheckoutRepository::new(db.clone())),
            Arc::new(SubscriptionRepository::new(db.clone())),
            Arc::new(ReferralService::new(Arc::new(ReferralRepository::new(db.clone())))),
            Arc::new(ConversionService::new(Arc::new(ConversionRepository::new(db)))),
            SECRET.to_string(),
            300,
        )
    }

    fn signed(payload: &str) -> String {
        sign_payload(payload.as_bytes(), SECRET, Utc::now().timestamp()).unwrap()
    }

    fn completed_payload() -> String {
        json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": {"object": {
                "id": "cs_1",
                "customer": "cus_1",
                "subscription": "sub_1",
                "payment_status": "paid",
                "amount_total": 4900,
                "currency": "usd",
                "metadata": {"plan_name": "Pro", "temp_user_id": "temp_1", "referral_code": "AB12CD34"}
            }}
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_invalid_signature_writes_nothing() {
        let server = MockServer::start_async().await;
        let any_call = server
            .mock_async(|when, then| {
                when.path_contains("/");
                then.status(200).json_body(json!([]));
            })
            .await;

        let service = service_for(&server);
        let payload = completed_payload();

        let missing = service.handle(payload.as_bytes(), None).await;
        let forged = service
            .handle(payload.as_bytes(), Some(&format!("t={},v1=deadbeef", Utc::now().timestamp())))
            .await;

        assert!(matches!(missing, Err(AppError::ValidationError(_))));
        assert!(matches!(forged, Err(AppError::ValidationError(_))));
        assert_eq!(any_call.hits_async().await, 0);
    }

    async fn mock_session_row(server: &MockServer, row: serde_json::Value) -> httpmock::Mock<'_> {
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/checkout_sessions")
                    .query_param("session_id", "eq.cs_1");
                then.status(200).json_body(json!([row]));
            })
            .await
    }

    #[tokio::test]
    async fn test_checkout_completed_promotes_temp_user() {
        let server = MockServer::start_async().await;
        mock_session_row(&server, json!({"session_id": "cs_1", "status": "pending", "temp_user_id": "temp_1"})).await;
        let mark_completed = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/checkout_sessions")
                    .json_body(json!({"status": "completed"}));
                then.status(200).json_body(json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/temp_users").query_param("id", "eq.temp_1");
                then.status(200).json_body(json!([{
                    "id": "temp_1",
                    "email": "buyer@example.com",
                    "password": "pw",
                    "full_name": "Buyer"
                }]));
            })
            .await;
        let create_user = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/admin/users")
                    .json_body_partial(r#"{"email":"buyer@example.com","email_confirm":true}"#);
                then.status(200).json_body(json!({"id": "u_new", "email": "buyer@example.com"}));
            })
            .await;
        let store_credentials = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/checkout_sessions")
                    .json_body(json!({
                        "user_id": "u_new",
                        "user_data": {"email": "buyer@example.com", "password": "pw"}
                    }));
                then.status(200).json_body(json!([]));
            })
            .await;
        let delete_temp = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/v1/temp_users");
                then.status(204);
            })
            .await;
        let upsert = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/subscriptions")
                    .query_param("on_conflict", "user_id")
                    .json_body_partial(r#"{"user_id":"u_new","status":"active","stripe_subscription_id":"sub_1"}"#);
                then.status(201).json_body(json!([]));
            })
            .await;
        let payment = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/subscription_payments")
                    .query_param("on_conflict", "stripe_session_id")
                    .json_body_partial(r#"{"user_id":"u_new","stripe_session_id":"cs_1","amount_total":4900}"#);
                then.status(201).json_body(json!([]));
            })
            .await;
        let conversion = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/conversion_events")
                    .json_body_partial(r#"{"event_type":"subscription_started"}"#);
                then.status(201).json_body(json!([]));
            })
            .await;
        let referral = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/referrals")
                    .query_param("code", "eq.AB12CD34");
                then.status(200).json_body(json!([]));
            })
            .await;

        let payload = completed_payload();
        let ack = service_for(&server)
            .handle(payload.as_bytes(), Some(&signed(&payload)))
            .await
            .unwrap();

        assert!(ack.received);
        mark_completed.assert_async().await;
        create_user.assert_async().await;
        store_credentials.assert_async().await;
        delete_temp.assert_async().await;
        upsert.assert_async().await;
        payment.assert_async().await;
        conversion.assert_async().await;
        referral.assert_async().await;
    }

    #[tokio::test]
    async fn test_redelivery_after_partial_failure_completes() {
        let server = MockServer::start_async().await;
        mock_session_row(&server, json!({"session_id": "cs_1", "status": "pending", "temp_user_id": "temp_1"})).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/temp_users").query_param("id", "eq.temp_1");
                then.status(200).json_body(json!([{
                    "id": "temp_1",
                    "email": "buyer@example.com",
                    "password": "pw"
                }]));
            })
            .await;
        let mut create_user = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/admin/users");
                then.status(200).json_body(json!({"id": "u_new", "email": "buyer@example.com"}));
            })
            .await;
        let mut store_failing = server
            .mock_async(|when, then| {
                when.method(PATCH).path("/rest/v1/checkout_sessions").body_contains("user_data");
                then.status(500).json_body(json!({"message": "connection reset"}));
            })
            .await;
        let upsert = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/subscriptions")
                    .json_body_partial(r#"{"user_id":"u_new","status":"active"}"#);
                then.status(201).json_body(json!([]));
            })
            .await;

        let service = service_for(&server);
        let payload = completed_payload();

        let first = service.handle(payload.as_bytes(), Some(&signed(&payload))).await;
        assert!(matches!(first, Err(AppError::DatabaseError(_))));
        assert_eq!(upsert.hits_async().await, 0);

        create_user.delete_async().await;
        store_failing.delete_async().await;
        let already_registered = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/admin/users");
                then.status(422).json_body(json!({
                    "error_code": "email_exists",
                    "msg": "A user with this email address has already been registered"
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/users");
                then.status(200).json_body(json!([{"id": "u_new", "email": "buyer@example.com"}]));
            })
            .await;
        let store_credentials = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/checkout_sessions")
                    .json_body_partial(r#"{"user_id":"u_new"}"#);
                then.status(200).json_body(json!([]));
            })
            .await;
        let delete_temp = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/v1/temp_users");
                then.status(204);
            })
            .await;
        let mark_completed = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/checkout_sessions")
                    .json_body(json!({"status": "completed"}));
                then.status(200).json_body(json!([]));
            })
            .await;
        let conversion = server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/conversion_events");
                then.status(201).json_body(json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/subscription_payments");
                then.status(201).json_body(json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PATCH).path("/rest/v1/referrals");
                then.status(200).json_body(json!([]));
            })
            .await;

        let second = service.handle(payload.as_bytes(), Some(&signed(&payload))).await;

        assert!(second.is_ok());
        already_registered.assert_async().await;
        store_credentials.assert_async().await;
        delete_temp.assert_async().await;
        upsert.assert_async().await;
        conversion.assert_async().await;
        mark_completed.assert_async().await;
    }

    #[tokio::test]
    async fn test_replay_of_completed_checkout_reuses_promoted_user() {
        let server = MockServer::start_async().await;
        mock_session_row(&server, json!({
            "session_id": "cs_1",
            "status": "completed",
            "temp_user_id": "temp_1",
            "user_id": "u_new"
        }))
        .await;
        let temp_lookup = server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/v1/temp_users");
                then.status(200).json_body(json!([]));
            })
            .await;
        let create_user = server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/admin/users");
                then.status(200).json_body(json!({"id": "u_other", "email": "buyer@example.com"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/v1/temp_users");
                then.status(204);
            })
            .await;
        let upsert = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/subscriptions")
                    .json_body_partial(r#"{"user_id":"u_new","status":"active"}"#);
                then.status(201).json_body(json!([]));
            })
            .await;
        let payment = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/subscription_payments")
                    .query_param("on_conflict", "stripe_session_id")
                    .json_body_partial(r#"{"user_id":"u_new","stripe_session_id":"cs_1"}"#);
                then.status(201).json_body(json!([]));
            })
            .await;
        let conversion = server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/conversion_events");
                then.status(201).json_body(json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PATCH).path("/rest/v1/referrals");
                then.status(200).json_body(json!([]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PATCH).path("/rest/v1/checkout_sessions");
                then.status(200).json_body(json!([]));
            })
            .await;

        let payload = completed_payload();
        service_for(&server)
            .handle(payload.as_bytes(), Some(&signed(&payload)))
            .await
            .unwrap();

        upsert.assert_async().await;
        payment.assert_async().await;
        assert_eq!(temp_lookup.hits_async().await, 0);
        assert_eq!(create_user.hits_async().await, 0);
        assert_eq!(conversion.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_subscription_deleted_sets_canceled() {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/subscriptions")
                    .query_param("stripe_subscription_id", "eq.sub_1")
                    .json_body_partial(r#"{"status":"canceled"}"#);
                then.status(200).json_body(json!([{"user_id": "u1", "status": "canceled"}]));
            })
            .await;

        let payload = json!({
            "id": "evt_3",
            "type": "customer.subscription.deleted",
            "data": {"object": {"id": "sub_1", "status": "canceled"}}
        })
        .to_string();

        service_for(&server)
            .handle(payload.as_bytes(), Some(&signed(&payload)))
            .await
            .unwrap();

        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_subscription_updated_copies_period_and_price() {
        let server = MockServer::start_async().await;
        let update = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/subscriptions")
                    .json_body_partial(
                        r#"{"status":"past_due","cancel_at_period_end":true,"price_id":"price_pro","current_period_end":"2023-11-14T22:13:20Z"}"#,
                    );
                then.status(200).json_body(json!([]));
            })
            .await;

        let payload = json!({
            "id": "evt_2",
            "type": "customer.subscription.updated",
            "data": {"object": {
                "id": "sub_1",
                "status": "past_due",
                "current_period_end": 1700000000,
                "cancel_at_period_end": true,
                "items": {"data": [{"price": {"id": "price_pro"}}]}
            }}
        })
        .to_string();

        service_for(&server)
            .handle(payload.as_bytes(), Some(&signed(&payload)))
            .await
            .unwrap();

        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_event_is_acknowledged() {
        let server = MockServer::start_async().await;
        let any_call = server
            .mock_async(|when, then| {
                when.path_contains("/");
                then.status(200);
            })
            .await;

        let payload = json!({"id": "evt_9", "type": "invoice.paid", "data": {"object": {}}}).to_string();
        let ack = service_for(&server)
            .handle(payload.as_bytes(), Some(&signed(&payload)))
            .await
            .unwrap();

        assert!(ack.received);
        assert_eq!(any_call.hits_async().await, 0);
    }
}
