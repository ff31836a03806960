use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid duration format: {0}")]
    InvalidDurationFormat(String),

    #[error("Cannot analyze an empty series")]
    EmptySeries,

    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Window out of range: {0}")]
    WindowOutOfRange(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

impl AppError {
    /// Whether the error comes from bad user input rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDurationFormat(_)
                | AppError::InvalidConfig(_)
                | AppError::UnknownProvider(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
