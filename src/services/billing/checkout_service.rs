//! # 체크아웃 서비스
//!
//! 결제 페이지 생성, 결제 완료 페이지의 세션 조회, 빌링 포털 세션 생성을 담당합니다.
//!
//! ```text
//! create_checkout
//!   ├─ 고객 조회 (이메일) ── 없으면 생성
//!   ├─ users.stripe_customer_id 기록 (userId가 있을 때)
//!   ├─ 구독 모드 체크아웃 세션 생성
//!   └─ checkout_sessions 행 삽입 (pending)
//! ```
//!
//! 업스트림 호출은 재시도하지 않으며 실패 시 그 지점에서 중단됩니다.

use std::sync::Arc;
use once_cell::sync::OnceCell;
use crate::config::SiteConfig;
use crate::core::registry::ServiceLocator;
use crate::domain::dto::billing::{
    CheckoutSessionCreated, CheckoutSessionStatus, PortalSessionCreated, ValidatedCheckout,
};
use crate::domain::entities::billing::checkout::{CheckoutSessionRecord, CHECKOUT_PENDING};
use crate::errors::errors::AppError;
use crate::repositories::billing::CheckoutRepository;
use crate::repositories::users::UserRepository;
use crate::services::auth::LoginTokenService;
use crate::services::billing::stripe_client::{CheckoutSessionParams, StripeClient};

pub struct CheckoutService {
    stripe: Arc<StripeClient>,
    users: Arc<UserRepository>,
    checkouts: Arc<CheckoutRepository>,
    login_tokens: Arc<LoginTokenService>,
    site_url: String,
}

static CHECKOUT_SERVICE_INSTANCE: OnceCell<Arc<CheckoutService>> = OnceCell::new();

impl CheckoutService {
    pub fn new(
        stripe: Arc<StripeClient>,
        users: Arc<UserRepository>,
        checkouts: Arc<CheckoutRepository>,
        login_tokens: Arc<LoginTokenService>,
        site_url: String,
    ) -> Self {
        Self {
            stripe,
            users,
            checkouts,
            login_tokens,
            site_url: site_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn instance() -> Arc<Self> {
        CHECKOUT_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    ServiceLocator::get::<StripeClient>(),
                    UserRepository::instance(),
                    CheckoutRepository::instance(),
                    LoginTokenService::instance(),
                    SiteConfig::url(),
                ))
            })
            .clone()
    }

    pub async fn create_checkout(&self, request: ValidatedCheckout) -> Result<CheckoutSessionCreated, AppError> {
        let customer = match self.stripe.find_customer_by_email(&request.customer_email).await? {
            Some(customer) => customer,
            None => {
                self.stripe
                    .create_customer(&request.customer_email, request.user_id.as_deref())
                    .await?
            }
        };

        if let Some(user_id) = request.user_id.as_deref() {
            self.users.set_stripe_customer_id(user_id, &customer.id).await?;
        }

        let params = CheckoutSessionParams {
            customer_id: customer.id.clone(),
            price_id: request.price_id.clone(),
            success_url: request.success_url.clone().unwrap_or_else(|| {
                format!("{}/checkout/success?session_id={{CHECKOUT_SESSION_ID}}", self.site_url)
            }),
            cancel_url: request
                .cancel_url
                .clone()
                .unwrap_or_else(|| format!("{}/pricing", self.site_url)),
            metadata: vec![
                ("plan_name".to_string(), request.plan_name.clone()),
                ("user_id".to_string(), request.user_id.clone().unwrap_or_default()),
                ("temp_user_id".to_string(), request.temp_user_id.clone().unwrap_or_default()),
                ("referral_code".to_string(), request.referral_code.clone().unwrap_or_default()),
            ],
        };
        let session = self.stripe.create_checkout_session(&params).await?;

        let record = CheckoutSessionRecord {
            session_id: session.id.clone(),
            customer_id: Some(customer.id),
            customer_email: Some(request.customer_email),
            plan_name: Some(request.plan_name),
            price_id: Some(request.price_id),
            temp_user_id: request.temp_user_id,
            user_id: request.user_id.clone(),
            status: CHECKOUT_PENDING.to_string(),
            user_data: None,
            created_at: None,
        };
        self.checkouts.insert_session(&record).await?;

        log::info!("체크아웃 세션 생성: {}", session.id);
        Ok(CheckoutSessionCreated {
            session_id: session.id,
            url: session.url,
        })
    }

    /// 결제가 끝난 세션이면 일회용 로그인 토큰을 함께 돌려줍니다.
    pub async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSessionStatus, AppError> {
        let session = self
            .stripe
            .retrieve_checkout_session(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("체크아웃 세션을 찾을 수 없습니다: {}", session_id)))?;

        let login_token = if session.is_paid() {
            Some(self.login_tokens.issue(&session.id)?)
        } else {
            None
        };

        Ok(CheckoutSessionStatus {
            plan_name: session.metadata_value("plan_name").map(str::to_string),
            customer_email: session.email().map(str::to_string),
            session_id: session.id,
            status: session.status,
            payment_status: session.payment_status,
            login_token,
        })
    }

    pub async fn create_portal_session(
        &self,
        user_id: &str,
        return_url: Option<String>,
    ) -> Result<PortalSessionCreated, AppError> {
        let customer_id = self
            .users
            .find_by_id(user_id)
            .await?
            .and_then(|user| user.stripe_customer_id)
            .ok_or_else(|| AppError::NotFound("결제 고객 정보가 없습니다".to_string()))?;

        let return_url = return_url.unwrap_or_else(|| format!("{}/dashboard", self.site_url));
        let portal = self.stripe.create_portal_session(&customer_id, &return_url).await?;

        Ok(PortalSessionCreated { url: portal.url })
    }
}

fn checkout_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(CheckoutService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "checkout_service",
        constructor: checkout_service_constructor,
    }
}
