pub mod contact_list;
pub mod message;

pub use contact_list::*;
pub use message::*;
