pub mod list_repo;
pub mod message_repo;

pub use list_repo::ListRepository;
pub use message_repo::MessageRepository;
