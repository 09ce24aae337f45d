use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
///
/// Classified fetch failures are not errors at this level: they are rendered
/// like any other view and turn into exit code 3 in `main`.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] coinpulse_core::ValidationError),

    #[error("configuration error: {0}")]
    Config(#[from] coinpulse_core::ConfigError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Config(_) => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
