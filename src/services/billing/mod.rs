//! 결제 서비스 모듈
//!
//! 결제 프로바이더 REST 클라이언트, 체크아웃/빌링 포털, 웹훅 처리, 구독 조회를 제공합니다.

pub mod stripe_client;
pub mod webhook_signature;
pub mod checkout_service;
pub mod webhook_service;
pub mod subscription_service;

pub use stripe_client::StripeClient;
pub use checkout_service::CheckoutService;
pub use webhook_service::WebhookService;
pub use subscription_service::SubscriptionService;
