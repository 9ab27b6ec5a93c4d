//! Unified error type for the connectivity check.
//!
//! Every stage of the check returns [`AppResult`]; the binary reports all
//! variants through the same failure path.

use serde::Serialize;

/// Application error.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration values that failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The native Oracle client library could not be initialized.
    #[error("Oracle client initialization failed: {0}")]
    ClientInit(String),

    /// Connecting to the database failed (credentials, network, wallet).
    #[error("Database connection failed: {0}")]
    DatabaseConnection(String),

    /// A statement failed to prepare, execute or fetch.
    #[error("Database query failed: {0}")]
    DatabaseQuery(String),

    /// Writing the report failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::ClientInit(_) => "CLIENT_INIT_ERROR",
            AppError::DatabaseConnection(_) => "DATABASE_CONNECTION_ERROR",
            AppError::DatabaseQuery(_) => "DATABASE_QUERY_ERROR",
            AppError::Io(_) => "OUTPUT_ERROR",
        }
    }

    /// Converts the error into its serializable form.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            success: false,
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// JSON body emitted when the check fails.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Value of [`AppError::error_code`].
    pub code: String,
    /// Display text of the error.
    pub message: String,
}
