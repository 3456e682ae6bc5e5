//! # Billing Configuration Module
//!
//! 결제 프로바이더(Stripe)와 결제 완료 후 발급되는 일회용 로그인 토큰 설정을 관리합니다.
//!
//! ```bash
//! export STRIPE_SECRET_KEY="sk_live_..."
//! export STRIPE_WEBHOOK_SECRET="whsec_..."
//! export LOGIN_TOKEN_SECRET="another-long-random-secret"
//! export LOGIN_TOKEN_TTL_MINUTES="15"
//! ```

use std::env;

pub struct StripeConfig;

impl StripeConfig {
    pub fn secret_key() -> String {
        env::var("STRIPE_SECRET_KEY")
            .expect("STRIPE_SECRET_KEY must be set")
    }

    pub fn webhook_secret() -> String {
        env::var("STRIPE_WEBHOOK_SECRET")
            .expect("STRIPE_WEBHOOK_SECRET must be set")
    }

    /// 테스트/프록시 환경에서 API 호스트를 바꿀 수 있습니다.
    pub fn api_base() -> String {
        env::var("STRIPE_API_BASE")
            .unwrap_or_else(|_| "https://api.stripe.com".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// 웹훅 서명 타임스탬프 허용 오차 (초)
    pub fn signature_tolerance_secs() -> i64 {
        env::var("STRIPE_SIGNATURE_TOLERANCE_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300)
    }
}

pub struct LoginTokenConfig;

impl LoginTokenConfig {
    pub fn secret() -> String {
        env::var("LOGIN_TOKEN_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("LOGIN_TOKEN_SECRET not set, using default (not secure for production!)");
                "login-token-secret".to_string()
            })
    }

    pub fn ttl_minutes() -> i64 {
        env::var("LOGIN_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .unwrap_or(15)
    }
}
