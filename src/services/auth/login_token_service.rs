//! # 일회용 로그인 토큰 서비스
//!
//! 결제 완료 페이지가 받은 토큰을 세션으로 바꿔 줍니다.
//!
//! ```text
//! issue(session_id)  → HS256 JWT {sub: session_id, jti, purpose: "checkout_login", iat, exp}
//! exchange(token)    → 서명/만료/용도 검증 → checkout_sessions.user_data 조회
//!                    → jti 사용 기록(SET NX EX) → 비밀번호 그랜트 → AuthSession
//! ```

use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use uuid::Uuid;
use crate::caching::redis::RedisClient;
use crate::caching::ConsumedTokenStore;
use crate::config::LoginTokenConfig;
use crate::core::registry::ServiceLocator;
use crate::db::Database;
use crate::domain::models::auth::{AuthSession, LoginTokenClaims, CHECKOUT_LOGIN_PURPOSE};
use crate::errors::errors::{AppError, ErrorContext};
use crate::repositories::billing::CheckoutRepository;

/// 검증 시 허용하는 시계 오차 (초)
const LEEWAY_SECS: u64 = 60;

pub struct LoginTokenService {
    secret: String,
    ttl: Duration,
    ledger: Arc<dyn ConsumedTokenStore>,
    checkouts: Arc<CheckoutRepository>,
    db: Arc<Database>,
}

static LOGIN_TOKEN_SERVICE_INSTANCE: OnceCell<Arc<LoginTokenService>> = OnceCell::new();

impl LoginTokenService {
    pub fn new(
        secret: String,
        ttl: Duration,
        ledger: Arc<dyn ConsumedTokenStore>,
        checkouts: Arc<CheckoutRepository>,
        db: Arc<Database>,
    ) -> Self {
        Self { secret, ttl, ledger, checkouts, db }
    }

    pub fn instance() -> Arc<Self> {
        LOGIN_TOKEN_SERVICE_INSTANCE
            .get_or_init(|| {
                Arc::new(Self::new(
                    LoginTokenConfig::secret(),
                    Duration::minutes(LoginTokenConfig::ttl_minutes()),
                    ServiceLocator::get::<RedisClient>(),
                    CheckoutRepository::instance(),
                    ServiceLocator::get::<Database>(),
                ))
            })
            .clone()
    }

    pub fn issue(&self, session_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = LoginTokenClaims {
            sub: session_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            purpose: CHECKOUT_LOGIN_PURPOSE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .context("로그인 토큰 생성 실패")
    }

    pub fn verify(&self, token: &str) -> Result<LoginTokenClaims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = LEEWAY_SECS;

        let claims = decode::<LoginTokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::AuthenticationError(format!("유효하지 않은 로그인 토큰입니다: {}", e)))?;

        if claims.purpose != CHECKOUT_LOGIN_PURPOSE {
            return Err(AppError::AuthenticationError("로그인 토큰 용도가 올바르지 않습니다".to_string()));
        }
        Ok(claims)
    }

    /// 토큰을 한 번만 세션으로 교환합니다.
    ///
    /// 로그인 정보가 아직 없거나(웹훅 처리 전) 로그인 그랜트가 실패하면 토큰은
    /// 소비되지 않은 상태로 남아 같은 토큰으로 다시 시도할 수 있습니다.
    pub async fn exchange(&self, token: &str) -> Result<AuthSession, AppError> {
        let claims = self.verify(token)?;

        let record = self
            .checkouts
            .find_session(&claims.sub)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("체크아웃 세션을 찾을 수 없습니다: {}", claims.sub)))?;

        let credentials = record
            .user_data
            .ok_or_else(|| AppError::ValidationError("체크아웃 세션에 로그인 정보가 아직 없습니다".to_string()))?;

        let remaining = (claims.exp - Utc::now().timestamp()).max(0) as u64 + LEEWAY_SECS;
        if !self.ledger.mark_consumed(&claims.jti, remaining).await? {
            log::warn!("재사용된 로그인 토큰: 세션 {}", claims.sub);
            return Err(AppError::AuthenticationError("이미 사용된 로그인 토큰입니다".to_string()));
        }

        match self.db.sign_in_with_password(&credentials.email, &credentials.password).await {
            Ok(session) => {
                log::info!("로그인 토큰 교환 완료: 세션 {}", claims.sub);
                Ok(session)
            }
            Err(err) => {
                if let Err(release_err) = self.ledger.release(&claims.jti).await {
                    log::error!("로그인 토큰 사용 기록 해제 실패: 세션 {}: {}", claims.sub, release_err);
                }
                Err(err)
            }
        }
    }
}

fn login_token_service_constructor() -> Box<dyn std::any::Any + Send + Sync> {
    Box::new(LoginTokenService::instance() as Arc<dyn std::any::Any + Send + Sync>)
}

inventory::submit! {
    crate::core::registry::ServiceRegistration {
        name: "login_token_service",
        constructor: login_token_service_constructor,
    }
}
