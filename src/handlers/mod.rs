//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 입력 검증과 응답 변환만 하고 로직은 서비스 싱글톤(`instance()`)에 맡깁니다.
//!
//! ```text
//! Client (마케팅 사이트, 대시보드, 결제 프로바이더)
//!   │ HTTP Request/Response
//!   ▼
//! Handlers (이 모듈)        ← Web Layer
//!   ▼
//! Services                 ← 집계, 결제, 토큰
//!   ▼
//! Repositories / Database  ← 호스티드 백엔드 REST
//! ```
//!
//! ## 모듈 구성
//!
//! - **`billing`**: 체크아웃 생성/조회, 빌링 포털, 결제 웹훅
//! - **`login_token`**: 결제 완료 후 일회용 로그인 토큰 교환
//! - **`public`**: 전환 이벤트, 추천 코드 사용 기록
//! - **`dashboard`**: 로그인 사용자의 리스트/퍼널/사용량/구독/추천
//! - **`admin`**: 사용자 관리, 전환 리포트
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며, 에러는
//! `AppError`의 `ResponseError` 구현으로 `{"data": null, "error": "..."}` 응답이 됩니다.
//!
//! ```rust,ignore
//! #[get("/usage")]
//! pub async fn my_usage(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     let usage = UsageService::instance().usage_for_user(&user.user_id).await?;
//!     Ok(HttpResponse::Ok().json(ApiResponse::success(usage)))
//! }
//! ```

pub mod billing;
pub mod login_token;
pub mod public;
pub mod dashboard;
pub mod admin;
