//! Oracle client backed by the `oracle` crate (ODPI-C, thick mode).

use chrono::NaiveDateTime;
use oracle::sql_type::ToSql;
use oracle::{Connection, InitParams};

use common::errors::{AppError, AppResult};
use common::models::{ConnectionConfig, TableStat};

use crate::client::{DatabaseClient, DatabaseSession};

const VERSION_SQL: &str = "SELECT banner FROM v$version WHERE ROWNUM = 1";
const SCHEMA_SQL: &str = "SELECT USER FROM DUAL";

/// Thick-mode Oracle client.
pub struct OracleClient;

impl DatabaseClient for OracleClient {
    type Session = OracleSession;

    fn init(&self, config: &ConnectionConfig) -> AppResult<bool> {
        let mut params = InitParams::new();
        if let Some(dir) = &config.client_lib_dir {
            params
                .oracle_client_lib_dir(dir.clone())
                .map_err(|e| AppError::ClientInit(e.to_string()))?;
        }
        // Wallet directory doubles as the network configuration directory
        // (sqlnet.ora / tnsnames.ora).
        if let Some(dir) = &config.wallet_dir {
            params
                .oracle_client_config_dir(dir.clone())
                .map_err(|e| AppError::ClientInit(e.to_string()))?;
        }
        params
            .init()
            .map_err(|e| AppError::ClientInit(e.to_string()))
    }

    fn connect(&self, config: &ConnectionConfig) -> AppResult<OracleSession> {
        let connect_string = config.target.connect_string();
        let conn = Connection::connect(&config.user, &config.password, &connect_string)
            .map_err(|e| AppError::DatabaseConnection(e.to_string()))?;
        Ok(OracleSession { conn })
    }
}

/// Session wrapping one `oracle::Connection`; dropped connections are
/// released by the driver.
pub struct OracleSession {
    conn: Connection,
}

impl DatabaseSession for OracleSession {
    fn server_version(&self) -> AppResult<String> {
        self.conn
            .query_row_as::<String>(VERSION_SQL, &[])
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))
    }

    fn current_schema(&self) -> AppResult<String> {
        self.conn
            .query_row_as::<String>(SCHEMA_SQL, &[])
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))
    }

    fn table_stats(&self, tables: &[String]) -> AppResult<Vec<TableStat>> {
        let sql = catalog_sql(tables.len());
        let mut stmt = self
            .conn
            .statement(&sql)
            .build()
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;

        let binds: Vec<&dyn ToSql> = tables.iter().map(|t| t as &dyn ToSql).collect();
        let mut stats = Vec::with_capacity(tables.len());
        {
            let rows = stmt
                .query_as::<(String, Option<i64>, Option<NaiveDateTime>)>(&binds)
                .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;
            for row in rows {
                let (name, num_rows, last_analyzed) =
                    row.map_err(|e| AppError::DatabaseQuery(e.to_string()))?;
                stats.push(TableStat::from_catalog(name, num_rows, last_analyzed));
            }
        }

        stmt.close()
            .map_err(|e| AppError::DatabaseQuery(e.to_string()))?;
        Ok(stats)
    }

    fn close(self) -> AppResult<()> {
        self.conn
            .close()
            .map_err(|e| AppError::DatabaseConnection(e.to_string()))
    }
}

/// Catalog query with one positional bind per table name.
fn catalog_sql(table_count: usize) -> String {
    let placeholders = (1..=table_count)
        .map(|i| format!(":{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT table_name, num_rows, last_analyzed \
         FROM user_tables \
         WHERE table_name IN ({}) \
         ORDER BY table_name",
        placeholders
    )
}
