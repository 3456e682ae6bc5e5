//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 한 곳에서 관리합니다.
//! 각 설정은 연관 함수로 노출되며 호출 시점에 환경 변수를 읽습니다.
//!
//! - [`data_config`] - 실행 환경, 서버, Rate Limiting, 호스티드 백엔드, Redis, 사이트 URL
//! - [`billing_config`] - Stripe, 일회용 로그인 토큰
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//!
//! # 호스티드 백엔드
//! export SUPABASE_URL="https://xyzcompany.supabase.co"
//! export SUPABASE_SERVICE_ROLE_KEY="service-role-key"
//! export SUPABASE_JWT_SECRET="jwt-secret"
//!
//! # 결제
//! export STRIPE_SECRET_KEY="sk_test_..."
//! export STRIPE_WEBHOOK_SECRET="whsec_..."
//!
//! # 사이트 / 로그인 토큰 / Redis
//! export SITE_URL="https://leadflow.example"
//! export LOGIN_TOKEN_SECRET="random-secret"
//! export REDIS_URL="redis://localhost:6379"
//! ```

pub mod data_config;
pub mod billing_config;

pub use data_config::*;
pub use billing_config::*;
