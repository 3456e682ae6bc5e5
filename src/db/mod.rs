//! Hosted Backend Connection Module
//!
//! 호스티드 백엔드(테이블 REST API + Auth API)에 대한 HTTP 클라이언트를 제공합니다.
//! 모든 요청에 서비스 롤 키를 `apikey`와 `Authorization: Bearer` 헤더로 붙입니다.
//!
//! # 환경 변수 설정
//!
//! ```bash
//! export SUPABASE_URL="https://xyzcompany.supabase.co"
//! export SUPABASE_SERVICE_ROLE_KEY="service-role-key"
//! ```
//!
//! # 기본 사용법
//!
//! ```rust,ignore
//! use crate::db::Database;
//!
//! let database = Database::new()?;
//! let lists: Vec<ContactList> = database
//!     .table("lists")
//!     .select("*")
//!     .eq("user_id", user_id)
//!     .order("created_at", false)
//!     .fetch()
//!     .await?;
//! ```

pub mod query;
pub mod auth_admin;

use std::time::Duration;
use reqwest::{RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use crate::config::BackendConfig;
use crate::errors::errors::{AppError, ErrorContext};

pub use query::TableQuery;

/// 호스티드 백엔드 연결 래퍼
///
/// `reqwest::Client`는 내부적으로 커넥션 풀을 공유하므로 복제 비용이 작습니다.
#[derive(Clone)]
pub struct Database {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl Database {
    /// 환경 변수에서 접속 정보를 읽어 클라이언트를 생성합니다.
    ///
    /// ## 환경 변수
    /// - `SUPABASE_URL`: 프로젝트 URL
    /// - `SUPABASE_SERVICE_ROLE_KEY`: 서비스 롤 키
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: 요청 타임아웃 (기본값: 30)
    pub fn new() -> Result<Self, AppError> {
        let database = Self::with_credentials(
            &BackendConfig::url(),
            &BackendConfig::service_role_key(),
            BackendConfig::request_timeout_secs(),
        )?;

        log::info!("✅ 호스티드 백엔드 클라이언트 생성: {}", database.base_url);
        Ok(database)
    }

    /// 명시적인 접속 정보로 클라이언트를 생성합니다.
    pub fn with_credentials(base_url: &str, service_key: &str, timeout_secs: u64) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        })
    }

    /// 테이블 쿼리 빌더를 시작합니다.
    pub fn table(&self, table: &str) -> TableQuery<'_> {
        TableQuery::new(self, table)
    }

    /// 데이터베이스 측 함수(RPC)를 호출합니다.
    ///
    /// ```rust,ignore
    /// let code: String = database.rpc("generate_referral_code", &json!({})).await?;
    /// ```
    pub async fn rpc<A, T>(&self, function: &str, args: &A) -> Result<T, AppError>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.rest_url(&format!("rpc/{}", function));
        let response = self
            .authorized(self.http.post(url))
            .json(args)
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("RPC {} 요청 실패: {}", function, e)))?;

        Self::read_json(response, &format!("RPC {}", function)).await
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, path)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    pub(crate) fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// 성공 응답은 JSON으로 역직렬화하고 실패 응답은 `DatabaseError`로 변환합니다.
    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, AppError> {
        let response = Self::ensure_success(response, context).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::DatabaseError(format!("{} 응답 파싱 실패: {}", context, e)))
    }

    pub(crate) async fn ensure_success(response: Response, context: &str) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AppError::DatabaseError(format!(
            "{} 실패 ({}): {}",
            context,
            status.as_u16(),
            upstream_message(&body)
        )))
    }
}

/// 에러 응답 본문에서 사람이 읽을 메시지를 뽑습니다.
///
/// 테이블 API는 `message`, Auth API는 `msg`/`error_description`을 사용합니다.
pub(crate) fn upstream_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_built_from_trimmed_base() {
        let database = Database::with_credentials("https://demo.supabase.co/", "key", 5).unwrap();

        assert_eq!(database.base_url(), "https://demo.supabase.co");
        assert_eq!(database.rest_url("lists"), "https://demo.supabase.co/rest/v1/lists");
        assert_eq!(
            database.auth_url("admin/users/u1"),
            "https://demo.supabase.co/auth/v1/admin/users/u1"
        );
    }

    #[test]
    fn test_upstream_message_extraction() {
        assert_eq!(
            upstream_message(r#"{"code":"42P01","message":"relation \"lists\" does not exist"}"#),
            "relation \"lists\" does not exist"
        );
        assert_eq!(upstream_message(r#"{"msg":"User not found"}"#), "User not found");
        assert_eq!(
            upstream_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
        assert_eq!(upstream_message("  bad gateway "), "bad gateway");
    }

    #[tokio::test]
    async fn test_rpc_sends_service_key_and_parses_result() {
        let server = httpmock::MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST)
                    .path("/rest/v1/rpc/generate_referral_code")
                    .header("apikey", "service-key")
                    .header("authorization", "Bearer service-key");
                then.status(200).json_body(serde_json::json!("AB12CD34"));
            })
            .await;

        let database = Database::with_credentials(&server.base_url(), "service-key", 5).unwrap();
        let code: String = database
            .rpc("generate_referral_code", &serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(code, "AB12CD34");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rpc_failure_surfaces_backend_message() {
        let server = httpmock::MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(httpmock::Method::POST).path("/rest/v1/rpc/missing_fn");
                then.status(404)
                    .json_body(serde_json::json!({"message": "Could not find the function"}));
            })
            .await;

        let database = Database::with_credentials(&server.base_url(), "key", 5).unwrap();
        let result: Result<String, AppError> = database.rpc("missing_fn", &serde_json::json!({})).await;

        match result {
            Err(AppError::DatabaseError(msg)) => {
                assert!(msg.contains("404"));
                assert!(msg.contains("Could not find the function"));
            }
            other => panic!("Expected DatabaseError, got {:?}", other.map(|_| ())),
        }
    }
}
