//! # Core Framework Module
//!
//! - [`registry`] - 인프라 컴포넌트 컨테이너(`ServiceLocator`)와 싱글톤 등록 정보
//!
//! 에러 타입은 [`crate::errors`]에 있으며 편의를 위해 여기서도 재export 합니다.
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::registry::ServiceLocator;
//!
//! ServiceLocator::set(Arc::new(Database::new()?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//! ServiceLocator::set(Arc::new(StripeClient::new()?));
//! ServiceLocator::initialize_all().await?;
//! ```

pub mod registry;

pub use crate::errors::errors::*;
pub use registry::*;
