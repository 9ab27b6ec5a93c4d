//! Database client abstraction.
//!
//! The check only talks to these traits; [`crate::oracle_client`] provides
//! the real implementation.

use common::errors::AppResult;
use common::models::{ConnectionConfig, TableStat};

/// Client runtime able to open sessions.
pub trait DatabaseClient {
    /// Session type produced by [`DatabaseClient::connect`].
    type Session: DatabaseSession;

    /// Initializes the native client runtime.
    ///
    /// Returns `true` when this call performed the initialization and `false`
    /// when the runtime was already initialized.
    fn init(&self, config: &ConnectionConfig) -> AppResult<bool>;

    /// Opens a session with the configured credentials and target.
    fn connect(&self, config: &ConnectionConfig) -> AppResult<Self::Session>;
}

/// An open database session.
///
/// Dropping a session releases it; [`DatabaseSession::close`] does the same
/// but reports errors.
pub trait DatabaseSession {
    /// First line of the server version banner.
    fn server_version(&self) -> AppResult<String>;

    /// Name of the session user.
    fn current_schema(&self) -> AppResult<String>;

    /// Catalog statistics for those of `tables` that exist in the schema.
    fn table_stats(&self, tables: &[String]) -> AppResult<Vec<TableStat>>;

    /// Closes the session.
    fn close(self) -> AppResult<()>;
}
