//! # Domain Entities
//!
//! 호스티드 백엔드 테이블의 행(row)을 그대로 표현하는 구조체들입니다.
//! 테이블의 소유권은 외부에 있으므로 이 계층은 불변식을 강제하지 않고
//! 이 서비스가 읽고 쓰는 컬럼만 선언합니다.
//!
//! ```text
//! entities/
//! ├── users/        ← users, profiles, user_roles
//! ├── leads/        ← lists, list_profiles, campaign_profiles, messages
//! ├── referrals/    ← referrals
//! ├── billing/      ← subscriptions, subscription_payments, usage_limits,
//! │                    checkout_sessions, temp_users
//! └── conversions/  ← conversion_events
//! ```

pub mod users;
pub mod leads;
pub mod referrals;
pub mod billing;
pub mod conversions;

pub use users::*;
pub use leads::*;
pub use referrals::*;
pub use billing::*;
pub use conversions::*;
