use thiserror::Error;

/// Common errors across the visualization core
#[derive(Error, Debug)]
pub enum SdvError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Box behind camera plane")]
    BehindCamera,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid field of view: {0} degrees (must be strictly between 0 and 180)")]
    InvalidFov(f64),

    #[error("Invalid image dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),
}

pub type Result<T> = std::result::Result<T, SdvError>;
