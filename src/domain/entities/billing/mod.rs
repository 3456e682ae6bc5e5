pub mod subscription;
pub mod checkout;

pub use subscription::*;
pub use checkout::*;
