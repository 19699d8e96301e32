pub mod duration;
pub mod environment;
pub mod error;
pub mod logging;

pub use environment::Config;
pub use error::ConfigError;
