//! 리드 수집 SaaS 백엔드
//!
//! 인스타그램 리드 수집 서비스의 서버 측 기능을 제공합니다.
//! 데이터는 호스티드 백엔드(테이블 REST API + Auth API)에 있고, 이 크레이트는
//! 그 위에서 집계, 결제, 추천, 관리자 기능을 HTTP API로 노출합니다.
//!
//! # Features
//!
//! - **대시보드 집계**: 리스트별 8단계 퍼널, 메시지 유형 분포, 사용량 대비 한도
//! - **추천 코드**: 사용자당 미전환 코드 재사용, 전환 통계
//! - **결제**: 구독 체크아웃, 빌링 포털, 서명 검증 웹훅
//! - **일회용 로그인 토큰**: 결제 완료 후 한 번만 세션으로 교환 (Redis 기록)
//! - **관리자**: 사용자 목록/역할 변경/삭제, 전환 리포트
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 입력 검증, 응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 집계, 결제, 토큰 (once_cell 싱글톤)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 테이블 단위 쿼리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────────────┐
//! │ Hosted REST/Auth + Stripe + Redis    │ ← 외부 저장소/프로바이더
//! └──────────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use leadflow_backend::services::stats::FunnelService;
//!
//! let funnels = FunnelService::instance().funnel_for_user(&user_id).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
