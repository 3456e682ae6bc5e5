pub mod user_repo;
pub mod profile_repo;
pub mod role_repo;

pub use user_repo::UserRepository;
pub use profile_repo::ProfileRepository;
pub use role_repo::RoleRepository;
