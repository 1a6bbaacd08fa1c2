//! Configuration, paths, and logging shared by the Taskdeck auth crates.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, SessionSettings, DEFAULT_API_URL, DEFAULT_LOG_LEVEL};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, CentralLogWriter};
pub use paths::Paths;
