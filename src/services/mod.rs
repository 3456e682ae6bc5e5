//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 `once_cell` 싱글톤(`instance()`)이며 `inventory::submit!`으로
//! 레지스트리에 등록되어 기동 시 [`crate::core::registry::ServiceLocator::initialize_all`]에서 생성됩니다.
//!
//! | 모듈 | 역할 |
//! |---|---|
//! | `stats` | 퍼널/메시지/사용량 집계, 전환 이벤트 |
//! | `referrals` | 추천 코드 발급과 전환 |
//! | `billing` | 결제 프로바이더 클라이언트, 체크아웃, 웹훅 |
//! | `auth` | 대시보드 JWT 검증, 일회용 로그인 토큰 |
//! | `users` | 관리자 사용자 관리 |
//!
//! ```rust,ignore
//! use crate::services::stats::FunnelService;
//!
//! let funnels = FunnelService::instance().funnel_for_user(&user.user_id).await?;
//! ```

pub mod stats;
pub mod referrals;
pub mod billing;
pub mod auth;
pub mod users;
