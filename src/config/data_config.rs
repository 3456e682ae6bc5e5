//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, HTTP 서버, Rate Limiting, 호스티드 백엔드, Redis, 사이트 URL 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// `ENVIRONMENT` (없으면 `NODE_ENV`) 환경 변수에서 현재 환경을 결정합니다.
    /// 값이 없거나 알 수 없으면 프로덕션으로 간주합니다.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| env::var("NODE_ENV").unwrap_or_else(|_| "production".to_string()));
        Self::from_str(&raw)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    pub fn workers() -> usize {
        env::var("SERVER_WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(4)
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경 변수에서 읽습니다.
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
    pub fn load() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "100".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
                100
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "200".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
                200
            });

        Self { per_second, burst_size }
    }
}

/// 호스티드 백엔드(REST 데이터 API + Auth API) 접속 설정
///
/// ```bash
/// export SUPABASE_URL="https://xyzcompany.supabase.co"
/// export SUPABASE_SERVICE_ROLE_KEY="service-role-key"
/// export SUPABASE_JWT_SECRET="jwt-secret"
/// ```
pub struct BackendConfig;

impl BackendConfig {
    pub fn url() -> String {
        env::var("SUPABASE_URL")
            .expect("SUPABASE_URL must be set")
            .trim_end_matches('/')
            .to_string()
    }

    pub fn service_role_key() -> String {
        env::var("SUPABASE_SERVICE_ROLE_KEY")
            .expect("SUPABASE_SERVICE_ROLE_KEY must be set")
    }

    /// 대시보드 사용자 JWT(HS256) 서명 검증용 비밀키
    pub fn jwt_secret() -> String {
        env::var("SUPABASE_JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("SUPABASE_JWT_SECRET not set, using default (not secure for production!)");
                "your-super-secret-jwt-token".to_string()
            })
    }

    pub fn request_timeout_secs() -> u64 {
        env::var("BACKEND_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30)
    }
}

/// Redis 접속 설정
pub struct RedisConfig;

impl RedisConfig {
    pub fn url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }
}

/// 마케팅 사이트(프론트엔드) 설정
pub struct SiteConfig;

impl SiteConfig {
    pub fn url() -> String {
        env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// CORS 허용 Origin 목록 (사이트 URL + 로컬 개발 서버)
    pub fn allowed_origins() -> Vec<String> {
        let mut origins = vec![
            Self::url(),
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
            "http://localhost:5173".to_string(),
        ];
        origins.dedup();
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("testing"), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        assert_eq!(Environment::from_str("anything-else"), Environment::Production);
        assert!(Environment::from_str("").is_production());
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }
        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }

    #[test]
    fn test_rate_limit_defaults() {
        if env::var("RATE_LIMIT_PER_SECOND").is_err() && env::var("RATE_LIMIT_BURST_SIZE").is_err() {
            assert_eq!(
                RateLimitConfig::load(),
                RateLimitConfig { per_second: 100, burst_size: 200 }
            );
        }
    }

    #[test]
    fn test_allowed_origins_include_local_dev() {
        let origins = SiteConfig::allowed_origins();
        assert!(origins.iter().any(|o| o == "http://localhost:3000"));
    }
}
