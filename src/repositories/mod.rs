//! # Repositories
//!
//! 테이블별 데이터 액세스 계층입니다. 각 리포지토리는 `Arc<Database>`를 보관하는
//! 싱글톤(`instance()`)이며 테스트에서는 `new(db)`로 직접 생성합니다.
//!
//! | 리포지토리 | 테이블 |
//! |---|---|
//! | [`users::UserRepository`] | `users` |
//! | [`users::ProfileRepository`] | `profiles` |
//! | [`users::RoleRepository`] | `user_roles` |
//! | [`leads::ListRepository`] | `lists`, `list_profiles`, `campaign_profiles` |
//! | [`leads::MessageRepository`] | `messages` |
//! | [`referrals::ReferralRepository`] | `referrals` |
//! | [`billing::SubscriptionRepository`] | `subscriptions`, `subscription_payments`, `usage_limits` |
//! | [`billing::CheckoutRepository`] | `checkout_sessions`, `temp_users` |
//! | [`conversions::ConversionRepository`] | `conversion_events` |

pub mod users;
pub mod leads;
pub mod referrals;
pub mod billing;
pub mod conversions;
