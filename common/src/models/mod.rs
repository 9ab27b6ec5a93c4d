//! Shared data models.

pub mod connection;
pub mod report;

// Re-export commonly used types
pub use connection::{ConnectTarget, ConnectionConfig, DEFAULT_ORACLE_PORT};
pub use report::{CheckReport, TableStat};
