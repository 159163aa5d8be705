//! Infrastructure for the CX showcase: configuration files and the
//! in-memory SDK client used in mock mode.

pub mod config_service;
pub mod in_memory_client;
pub mod paths;

pub use config_service::ConfigService;
pub use in_memory_client::InMemoryCxClient;
pub use paths::ShowcasePaths;
