//! Check result models.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

/// Catalog statistics for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStat {
    /// Upper-case table name.
    pub table_name: String,
    /// Approximate row count from optimizer statistics; `0` when unknown.
    pub num_rows: u64,
    /// When the statistics were gathered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_analyzed: Option<NaiveDateTime>,
}

impl TableStat {
    /// Builds a row from raw `user_tables` columns.
    pub fn from_catalog(
        table_name: impl Into<String>,
        num_rows: Option<i64>,
        last_analyzed: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            num_rows: num_rows.and_then(|n| u64::try_from(n).ok()).unwrap_or(0),
            last_analyzed,
        }
    }
}

/// Successful check outcome.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Always `true`; failures are reported as an error body instead.
    pub success: bool,
    /// Connect target description.
    pub target: String,
    /// Database user.
    pub user: String,
    /// Wallet directory in use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_dir: Option<String>,
    /// Oracle client library directory in use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_lib_dir: Option<String>,
    /// First `v$version` banner line.
    pub server_version: String,
    /// Session user (`SELECT USER FROM DUAL`).
    pub current_schema: String,
    /// Checked tables that exist, ordered by name.
    pub tables: Vec<TableStat>,
    /// Wall time of the whole check in milliseconds.
    pub elapsed_ms: u64,
    /// Completion timestamp.
    pub checked_at: DateTime<Utc>,
}
