pub mod conversion_event;

pub use conversion_event::*;
