//! Application configuration.
//!
//! Settings come from the process environment (optionally seeded from a
//! `.env` file by the binary before this module runs).
//!
//! | Env Var                    | Meaning                                     |
//! |----------------------------|---------------------------------------------|
//! | `ORACLE_USER`              | database user (required)                    |
//! | `ORACLE_PASSWORD`          | database password (required)                |
//! | `TNS_ADMIN`                | wallet / network configuration directory    |
//! | `ORACLE_CLIENT_LIB_DIR`    | Instant Client directory                    |
//! | `ORACLE_CLIENT_PATH`       | fallback for `ORACLE_CLIENT_LIB_DIR`        |
//! | `ORACLE_CONNECTION_STRING` | Easy Connect string (highest priority)      |
//! | `ORACLE_TNS_NAME`          | wallet network alias                        |
//! | `ORACLE_HOST`              | host for component form (`localhost`)       |
//! | `ORACLE_PORT`              | port for component form (`1521`)            |
//! | `ORACLE_SERVICE_NAME`      | service name for component form            |
//! | `ORACLE_SID`               | fallback for `ORACLE_SERVICE_NAME`          |
//! | `CHECK_TABLES`             | comma-separated table list override         |
//! | `OUTPUT_FORMAT`            | `text` (default) or `json`                  |

use std::path::PathBuf;
use std::str::FromStr;

use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::connection::{ConnectTarget, ConnectionConfig, DEFAULT_ORACLE_PORT};
use crate::utils::IdentifierValidator;

/// Tables checked when `CHECK_TABLES` is not set.
pub const DEFAULT_TABLES: [&str; 5] = [
    "PHOTOS",
    "PROJECTS",
    "TASKS",
    "YOLO_DETECTIONS",
    "FACE_DETECTIONS",
];

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable progress lines.
    #[default]
    Text,
    /// One JSON document at the end.
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::Config(format!(
                "OUTPUT_FORMAT must be `text` or `json`, got `{}`",
                other
            ))),
        }
    }
}

impl OutputFormat {
    /// Best-effort read of `OUTPUT_FORMAT` for reporting a configuration
    /// failure: unset or unparsable values fall back to text.
    pub fn requested<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("OUTPUT_FORMAT")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

/// Full configuration of one check run.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    /// Oracle connection settings.
    #[validate(nested)]
    pub connection: ConnectionConfig,
    /// Upper-case table names to look up in the catalog.
    #[validate(length(min = 1, message = "at least one table must be checked"))]
    pub tables: Vec<String>,
    /// Output format.
    pub output: OutputFormat,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let target = resolve_target(&get)?;

        let connection = ConnectionConfig {
            user: get("ORACLE_USER").unwrap_or_default(),
            // not trimmed
            password: lookup("ORACLE_PASSWORD").unwrap_or_default(),
            wallet_dir: get("TNS_ADMIN").map(PathBuf::from),
            client_lib_dir: get("ORACLE_CLIENT_LIB_DIR")
                .or_else(|| get("ORACLE_CLIENT_PATH"))
                .map(PathBuf::from),
            target,
        };

        let tables = match get("CHECK_TABLES") {
            Some(raw) => IdentifierValidator::parse_list(&raw)?,
            None => DEFAULT_TABLES.iter().map(|t| t.to_string()).collect(),
        };

        let output = match get("OUTPUT_FORMAT") {
            Some(raw) => raw.parse()?,
            None => OutputFormat::default(),
        };

        let config = Self {
            connection,
            tables,
            output,
        };
        config.validate()?;

        tracing::debug!(
            user = %config.connection.user,
            connect_target = %config.connection.target,
            tables = config.tables.len(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

/// Picks the connect target: connection string, then TNS alias, then components.
fn resolve_target<G>(get: &G) -> AppResult<ConnectTarget>
where
    G: Fn(&str) -> Option<String>,
{
    if let Some(connect_string) = get("ORACLE_CONNECTION_STRING") {
        return Ok(ConnectTarget::ConnectionString { connect_string });
    }
    if let Some(alias) = get("ORACLE_TNS_NAME") {
        return Ok(ConnectTarget::TnsAlias { alias });
    }

    let service = get("ORACLE_SERVICE_NAME")
        .or_else(|| get("ORACLE_SID"))
        .ok_or_else(|| {
            AppError::Config(
                "Oracle connection requires ORACLE_CONNECTION_STRING, ORACLE_TNS_NAME, \
                 or ORACLE_SERVICE_NAME/ORACLE_SID"
                    .into(),
            )
        })?;
    let host = get("ORACLE_HOST").unwrap_or_else(|| "localhost".into());
    let port = match get("ORACLE_PORT") {
        Some(raw) => raw
            .parse::<u16>()
            .map_err(|_| AppError::Config(format!("ORACLE_PORT is not a valid port: {}", raw)))?,
        None => DEFAULT_ORACLE_PORT,
    };

    Ok(ConnectTarget::Components {
        host,
        port,
        service,
    })
}
