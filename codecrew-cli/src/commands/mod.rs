//! CLI command implementations

pub mod review;
pub mod secrets;
pub mod serve;

pub use review::ReviewArgs;
pub use secrets::SecretsArgs;
pub use serve::ServeArgs;
