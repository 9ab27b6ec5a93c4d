//! 连通性检查服务模块

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use chrono::Utc;

use common::config::AppConfig;
use common::errors::AppResult;
use common::models::CheckReport;

use crate::client::{DatabaseClient, DatabaseSession};

/// Runs the connectivity check against a [`DatabaseClient`].
pub struct ConnectivityService<C> {
    client: C,
}

impl<C: DatabaseClient> ConnectivityService<C> {
    /// 创建新的检查服务实例
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Initializes the client, connects, runs the diagnostic queries and
    /// closes the session.
    ///
    /// Progress lines are written to `out` as each stage completes, so a
    /// failure leaves everything printed up to that point. The session is
    /// closed explicitly on success and released by `Drop` on every error
    /// path.
    pub fn run<W: Write>(&self, config: &AppConfig, out: &mut W) -> AppResult<CheckReport> {
        let start = Instant::now();
        let conn_config = &config.connection;

        writeln!(out, "Config dir: {}", display_dir(conn_config.wallet_dir.as_deref()))?;
        writeln!(out, "User: {}", conn_config.user)?;
        writeln!(out, "Connecting to Oracle database via {}...", conn_config.target)?;

        let fresh = self.client.init(conn_config)?;
        tracing::info!(
            fresh,
            wallet_dir = ?conn_config.wallet_dir,
            client_lib_dir = ?conn_config.client_lib_dir,
            "Oracle client initialized"
        );
        writeln!(out, "Oracle client initialized in thick mode")?;

        let session = self.client.connect(conn_config)?;
        tracing::info!(connect_target = %conn_config.target, user = %conn_config.user, "Connected");
        writeln!(out, "✅ Connection successful!")?;

        let server_version = session.server_version()?;
        writeln!(out, "Database version: {}", server_version)?;

        let current_schema = session.current_schema()?;
        writeln!(out, "Current schema: {}", current_schema)?;

        let mut tables = session.table_stats(&config.tables)?;
        tables.sort_by(|a, b| a.table_name.cmp(&b.table_name));
        tracing::info!(found = tables.len(), checked = config.tables.len(), "Catalog queried");

        session.close()?;
        tracing::debug!("Session closed");

        Ok(CheckReport {
            success: true,
            target: conn_config.target.to_string(),
            user: conn_config.user.clone(),
            wallet_dir: conn_config.wallet_dir.as_ref().map(|p| p.display().to_string()),
            client_lib_dir: conn_config
                .client_lib_dir
                .as_ref()
                .map(|p| p.display().to_string()),
            server_version,
            current_schema,
            tables,
            elapsed_ms: start.elapsed().as_millis() as u64,
            checked_at: Utc::now(),
        })
    }
}

fn display_dir(dir: Option<&Path>) -> String {
    dir.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(client default)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{config, fake, Counters, FailAt};
    use assert_matches::assert_matches;
    use common::errors::AppError;
    use std::rc::Rc;

    fn run(fail_at: FailAt) -> (AppResult<CheckReport>, String, Rc<Counters>) {
        let (client, counters) = fake(fail_at);
        let service = ConnectivityService::new(client);
        let mut out = Vec::new();
        let result = service.run(&config(), &mut out);
        (result, String::from_utf8(out).unwrap(), counters)
    }

    #[test]
    fn test_success_reports_existing_tables_sorted() {
        let (result, output, _) = run(FailAt::Nowhere);
        let report = result.unwrap();

        let names: Vec<_> = report.tables.iter().map(|t| t.table_name.as_str()).collect();
        assert_eq!(names, vec!["FACE_DETECTIONS", "PHOTOS", "TASKS"]);
        assert_eq!(report.tables[0].num_rows, 0);
        assert_eq!(report.tables[1].num_rows, 1250);
        assert!(report.server_version.starts_with("Oracle Database"));
        assert_eq!(report.current_schema, "ADMIN");
        assert_eq!(report.target, "TNS alias photosightdb_high");

        assert!(output.contains("Config dir: /wallets/photosight"));
        assert!(output.contains("Connecting to Oracle database via TNS alias photosightdb_high..."));
        assert!(output.contains("✅ Connection successful!"));
        assert!(output.contains("Database version: Oracle Database 23ai"));
    }

    #[test]
    fn test_success_closes_all_resources() {
        let (result, _, counters) = run(FailAt::Nowhere);
        assert!(result.is_ok());
        assert_eq!(counters.sessions_opened.get(), 1);
        assert_eq!(counters.sessions_closed.get(), 1);
        assert_eq!(counters.sessions_released.get(), 1);
        assert_eq!(counters.statements_opened.get(), 3);
        assert_eq!(counters.statements_released.get(), 3);
    }

    #[test]
    fn test_connect_failure() {
        let (result, output, counters) = run(FailAt::Connect);
        assert_matches!(result, Err(AppError::DatabaseConnection(msg)) if msg.contains("ORA-01017"));
        assert!(output.contains("Oracle client initialized in thick mode"));
        assert!(!output.contains("Connection successful"));
        assert_eq!(counters.sessions_opened.get(), 0);
    }

    #[test]
    fn test_init_failure_stops_before_connect() {
        let (result, output, counters) = run(FailAt::Init);
        assert_matches!(result, Err(AppError::ClientInit(_)));
        assert!(output.contains("User: ADMIN"));
        assert!(!output.contains("initialized in thick mode"));
        assert_eq!(counters.sessions_opened.get(), 0);
    }

    #[test]
    fn test_query_failure_releases_session() {
        let (result, output, counters) = run(FailAt::Catalog);
        assert_matches!(result, Err(AppError::DatabaseQuery(_)));
        assert!(output.contains("Current schema: ADMIN"));
        assert_eq!(counters.sessions_closed.get(), 0);
        assert_eq!(counters.sessions_released.get(), 1);
        assert_eq!(
            counters.statements_opened.get(),
            counters.statements_released.get()
        );
    }

    #[test]
    fn test_version_failure_keeps_partial_output() {
        let (result, output, counters) = run(FailAt::Version);
        assert_matches!(result, Err(AppError::DatabaseQuery(_)));
        assert!(output.contains("✅ Connection successful!"));
        assert!(!output.contains("Database version"));
        assert_eq!(counters.sessions_released.get(), 1);
    }

    #[test]
    fn test_missing_wallet_dir_display() {
        assert_eq!(display_dir(None), "(client default)");
    }
}
