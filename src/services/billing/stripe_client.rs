//! # 결제 프로바이더(Stripe) REST 클라이언트
//!
//! 요청 본문은 폼 인코딩(`application/x-www-form-urlencoded`)이며 중첩 필드는
//! `metadata[plan_name]`, `line_items[0][price]` 형식의 키로 표현합니다.
//! 비밀키는 `Authorization: Bearer`로 전달합니다.
//!
//! | 메서드 | 엔드포인트 |
//! |---|---|
//! | [`StripeClient::find_customer_by_email`] | `GET /v1/customers?email=&limit=1` |
//! | [`StripeClient::create_customer`] | `POST /v1/customers` |
//! | [`StripeClient::create_checkout_session`] | `POST /v1/checkout/sessions` |
//! | [`StripeClient::retrieve_checkout_session`] | `GET /v1/checkout/sessions/{id}` |
//! | [`StripeClient::create_portal_session`] | `POST /v1/billing_portal/sessions` |

use std::time::Duration;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use crate::config::{BackendConfig, StripeConfig};
use crate::domain::models::stripe::{CheckoutSession, Customer, ErrorEnvelope, List, PortalSession};
use crate::errors::errors::{AppError, ErrorContext};

/// 구독 체크아웃 세션 생성 파라미터
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionParams {
    pub customer_id: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
    /// 빈 값은 전송하지 않습니다.
    pub metadata: Vec<(String, String)>,
}

impl CheckoutSessionParams {
    fn to_form(&self) -> Vec<(String, String)> {
        let mut form = vec![
            ("mode".to_string(), "subscription".to_string()),
            ("customer".to_string(), self.customer_id.clone()),
            ("line_items[0][price]".to_string(), self.price_id.clone()),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("success_url".to_string(), self.success_url.clone()),
            ("cancel_url".to_string(), self.cancel_url.clone()),
        ];
        for (key, value) in &self.metadata {
            if !value.is_empty() {
                form.push((format!("metadata[{}]", key), value.clone()));
            }
        }
        form
    }
}

#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    /// 환경 변수(`STRIPE_SECRET_KEY`, `STRIPE_API_BASE`)로 클라이언트를 생성합니다.
    pub fn new() -> Result<Self, AppError> {
        let client = Self::with_credentials(
            &StripeConfig::api_base(),
            &StripeConfig::secret_key(),
            BackendConfig::request_timeout_secs(),
        )?;

        log::info!("✅ 결제 프로바이더 클라이언트 생성: {}", client.api_base);
        Ok(client)
    }

    pub fn with_credentials(api_base: &str, secret_key: &str, timeout_secs: u64) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.api_base, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.secret_key)
    }

    async fn send(&self, builder: RequestBuilder, context: &str) -> Result<Response, AppError> {
        self.authorized(builder)
            .send()
            .await
            .map_err(|e| AppError::PaymentProviderError(format!("{} 요청 실패: {}", context, e)))
    }

    async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::PaymentProviderError(provider_message(&body, status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::PaymentProviderError(format!("{} 응답 파싱 실패: {}", context, e)))
    }

    pub async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        let builder = self
            .http
            .get(self.url("customers"))
            .query(&[("email", email), ("limit", "1")]);
        let response = self.send(builder, "고객 조회").await?;

        let customers: List<Customer> = Self::read_json(response, "고객 조회").await?;
        Ok(customers.data.into_iter().next())
    }

    pub async fn create_customer(&self, email: &str, user_id: Option<&str>) -> Result<Customer, AppError> {
        let mut form = vec![("email".to_string(), email.to_string())];
        if let Some(user_id) = user_id {
            form.push(("metadata[user_id]".to_string(), user_id.to_string()));
        }

        let builder = self.http.post(self.url("customers")).form(&form);
        let response = self.send(builder, "고객 생성").await?;

        let customer: Customer = Self::read_json(response, "고객 생성").await?;
        log::info!("결제 고객 생성: {}", customer.id);
        Ok(customer)
    }

    pub async fn create_checkout_session(&self, params: &CheckoutSessionParams) -> Result<CheckoutSession, AppError> {
        let builder = self
            .http
            .post(self.url("checkout/sessions"))
            .form(&params.to_form());
        let response = self.send(builder, "체크아웃 세션 생성").await?;

        Self::read_json(response, "체크아웃 세션 생성").await
    }

    /// 존재하지 않는 세션이면 `None`
    pub async fn retrieve_checkout_session(&self, session_id: &str) -> Result<Option<CheckoutSession>, AppError> {
        let url = self.url(&format!("checkout/sessions/{}", urlencoding::encode(session_id)));
        let response = self.send(self.http.get(url), "체크아웃 세션 조회").await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read_json(response, "체크아웃 세션 조회").await.map(Some)
    }

    pub async fn create_portal_session(&self, customer_id: &str, return_url: &str) -> Result<PortalSession, AppError> {
        let form = [("customer", customer_id), ("return_url", return_url)];
        let builder = self.http.post(self.url("billing_portal/sessions")).form(&form);
        let response = self.send(builder, "빌링 포털 세션 생성").await?;

        Self::read_json(response, "빌링 포털 세션 생성").await
    }
}

/// 에러 응답에서 `error.message`를 꺼냅니다.
fn provider_message(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .unwrap_or_else(|| format!("결제 프로바이더 응답 오류 ({}): {}", status.as_u16(), body.trim()))
}
