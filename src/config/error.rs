#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    Env { key: String, value: String },
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to decode YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unsupported config file format: {0:?}")]
    UnsupportedFormat(String),
    #[error("Invalid duration: {0:?}")]
    InvalidDuration(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
