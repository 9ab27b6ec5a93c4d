//! In-memory database client shared by unit tests.
//!
//! Counts opened and released sessions/statements so tests can assert that
//! every resource is given back.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use common::config::{AppConfig, OutputFormat, DEFAULT_TABLES};
use common::errors::{AppError, AppResult};
use common::models::{ConnectTarget, ConnectionConfig, TableStat};

use crate::client::{DatabaseClient, DatabaseSession};

/// Resource counters shared between a fake client and its sessions.
#[derive(Default)]
pub(crate) struct Counters {
    pub sessions_opened: Cell<u32>,
    pub sessions_closed: Cell<u32>,
    pub sessions_released: Cell<u32>,
    pub statements_opened: Cell<u32>,
    pub statements_released: Cell<u32>,
}

#[derive(Clone, Copy, PartialEq)]
pub(crate) enum FailAt {
    Nowhere,
    Init,
    Connect,
    Version,
    Catalog,
}

pub(crate) struct FakeClient {
    counters: Rc<Counters>,
    existing: Vec<(&'static str, Option<i64>)>,
    fail_at: FailAt,
}

pub(crate) struct FakeSession {
    counters: Rc<Counters>,
    existing: Vec<(&'static str, Option<i64>)>,
    fail_at: FailAt,
}

pub(crate) struct FakeStatement {
    counters: Rc<Counters>,
}

impl FakeStatement {
    fn open(counters: &Rc<Counters>) -> Self {
        counters.statements_opened.set(counters.statements_opened.get() + 1);
        Self {
            counters: Rc::clone(counters),
        }
    }
}

impl Drop for FakeStatement {
    fn drop(&mut self) {
        let c = &self.counters.statements_released;
        c.set(c.get() + 1);
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        let c = &self.counters.sessions_released;
        c.set(c.get() + 1);
    }
}

impl DatabaseClient for FakeClient {
    type Session = FakeSession;

    fn init(&self, _config: &ConnectionConfig) -> AppResult<bool> {
        if self.fail_at == FailAt::Init {
            return Err(AppError::ClientInit(
                "DPI-1047: Cannot locate a 64-bit Oracle Client library".into(),
            ));
        }
        Ok(true)
    }

    fn connect(&self, _config: &ConnectionConfig) -> AppResult<FakeSession> {
        if self.fail_at == FailAt::Connect {
            return Err(AppError::DatabaseConnection(
                "ORA-01017: invalid username/password; logon denied".into(),
            ));
        }
        self.counters
            .sessions_opened
            .set(self.counters.sessions_opened.get() + 1);
        Ok(FakeSession {
            counters: Rc::clone(&self.counters),
            existing: self.existing.clone(),
            fail_at: self.fail_at,
        })
    }
}

impl DatabaseSession for FakeSession {
    fn server_version(&self) -> AppResult<String> {
        let _stmt = FakeStatement::open(&self.counters);
        if self.fail_at == FailAt::Version {
            return Err(AppError::DatabaseQuery("ORA-00942: table or view does not exist".into()));
        }
        Ok("Oracle Database 23ai Enterprise Edition Release 23.0.0.0.0".into())
    }

    fn current_schema(&self) -> AppResult<String> {
        let _stmt = FakeStatement::open(&self.counters);
        Ok("ADMIN".into())
    }

    fn table_stats(&self, tables: &[String]) -> AppResult<Vec<TableStat>> {
        let _stmt = FakeStatement::open(&self.counters);
        if self.fail_at == FailAt::Catalog {
            return Err(AppError::DatabaseQuery("ORA-03113: end-of-file on communication channel".into()));
        }
        // Deliberately unordered to exercise sorting in the service.
        Ok(self
            .existing
            .iter()
            .rev()
            .filter(|(name, _)| tables.iter().any(|t| t == name))
            .map(|(name, rows)| TableStat::from_catalog(*name, *rows, None))
            .collect())
    }

    fn close(self) -> AppResult<()> {
        let c = &self.counters.sessions_closed;
        c.set(c.get() + 1);
        Ok(())
    }
}

pub(crate) fn fake(fail_at: FailAt) -> (FakeClient, Rc<Counters>) {
    let counters = Rc::new(Counters::default());
    let client = FakeClient {
        counters: Rc::clone(&counters),
        existing: vec![
            ("FACE_DETECTIONS", None),
            ("PHOTOS", Some(1250)),
            ("AUDIT_LOG", Some(9)),
            ("TASKS", Some(0)),
        ],
        fail_at,
    };
    (client, counters)
}

pub(crate) fn config() -> AppConfig {
    AppConfig {
        connection: ConnectionConfig {
            user: "ADMIN".into(),
            password: "pw".into(),
            wallet_dir: Some(PathBuf::from("/wallets/photosight")),
            client_lib_dir: Some(PathBuf::from("/opt/oracle/instantclient_19_16")),
            target: ConnectTarget::TnsAlias {
                alias: "photosightdb_high".into(),
            },
        },
        tables: DEFAULT_TABLES.iter().map(|t| t.to_string()).collect(),
        output: OutputFormat::Text,
    }
}
