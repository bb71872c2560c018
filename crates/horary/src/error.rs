use thiserror::Error;

/// Errors raised by the horary engine.
///
/// Incomplete chart data is never an error: the engine answers with
/// "no event" instead. These variants cover configuration and input parsing.
#[derive(Error, Debug)]
pub enum HoraryError {
    #[error("Invalid configuration value for {field}: {message}")]
    InvalidConfig { field: String, message: String },
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Failed to parse chart: {0}")]
    ChartParse(#[from] serde_json::Error),
    #[error("Unknown body: {name}. Valid bodies: {valid:?}")]
    UnknownBody { name: String, valid: Vec<String> },
    #[error("Unknown aspect: {name}. Valid aspects: {valid:?}")]
    UnknownAspect { name: String, valid: Vec<String> },
    #[error("Unknown sign: {name}")]
    UnknownSign { name: String },
    #[error("Reception classification failed for {body_a}/{body_b}: {message}")]
    Reception {
        body_a: String,
        body_b: String,
        message: String,
    },
}

impl HoraryError {
    pub(crate) fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        HoraryError::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
