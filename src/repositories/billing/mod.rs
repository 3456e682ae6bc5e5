pub mod subscription_repo;
pub mod checkout_repo;

pub use subscription_repo::SubscriptionRepository;
pub use checkout_repo::CheckoutRepository;
