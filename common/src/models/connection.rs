//! Connection configuration models.
//!
//! Contains the Oracle connection settings read at startup.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use validator::Validate;

/// Default listener port used when only host/service are configured.
pub const DEFAULT_ORACLE_PORT: u16 = 1521;

/// How the connect string is obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConnectTarget {
    /// Easy Connect string used verbatim.
    ConnectionString { connect_string: String },
    /// Network alias resolved through the wallet's `tnsnames.ora`.
    TnsAlias { alias: String },
    /// `host:port/service` assembled from individual settings.
    Components {
        host: String,
        port: u16,
        service: String,
    },
}

impl ConnectTarget {
    /// Returns the connect string handed to the Oracle client.
    pub fn connect_string(&self) -> String {
        match self {
            ConnectTarget::ConnectionString { connect_string } => connect_string.clone(),
            ConnectTarget::TnsAlias { alias } => alias.clone(),
            ConnectTarget::Components { host, port, service } => {
                format!("{}:{}/{}", host, port, service)
            }
        }
    }
}

impl fmt::Display for ConnectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectTarget::ConnectionString { connect_string } => {
                write!(f, "connection string {}", connect_string)
            }
            ConnectTarget::TnsAlias { alias } => write!(f, "TNS alias {}", alias),
            ConnectTarget::Components { .. } => {
                write!(f, "Easy Connect {}", self.connect_string())
            }
        }
    }
}

/// Oracle connection settings.
#[derive(Clone, Serialize, Validate)]
pub struct ConnectionConfig {
    /// Database user.
    #[validate(length(min = 1, message = "ORACLE_USER is required"))]
    pub user: String,
    /// Database password (never serialized or logged).
    #[serde(skip_serializing)]
    #[validate(length(min = 1, message = "ORACLE_PASSWORD is required"))]
    pub password: String,
    /// Wallet / network configuration directory (`TNS_ADMIN`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_dir: Option<PathBuf>,
    /// Oracle Instant Client library directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_lib_dir: Option<PathBuf>,
    /// Where to connect.
    pub target: ConnectTarget,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("user", &self.user)
            .field("password", &"******")
            .field("wallet_dir", &self.wallet_dir)
            .field("client_lib_dir", &self.client_lib_dir)
            .field("target", &self.target)
            .finish()
    }
}
