//! 대시보드 집계 서비스
//!
//! 집계 로직은 순수 함수로 분리되어 있어 행 목록만으로 테스트할 수 있습니다.

pub mod funnel;
pub mod usage;
pub mod conversions;

pub use funnel::FunnelService;
pub use usage::UsageService;
pub use conversions::ConversionService;
