pub mod referral_repo;

pub use referral_repo::ReferralRepository;
