//! API request handlers.

pub mod health;
pub mod page;
pub mod review;

pub use health::*;
pub use page::*;
pub use review::*;
