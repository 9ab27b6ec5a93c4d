//! PhotoSight 数据库连通性检查
//!
//! 使用钱包（wallet）与 Oracle 客户端（thick 模式）连接数据库，包括：
//! - 查询服务器版本
//! - 查询当前 schema
//! - 列出 PhotoSight 表及其估算行数

mod client;
mod oracle_client;
mod render;
mod service;
#[cfg(test)]
mod test_support;

use std::io::{self, Write};
use std::process::ExitCode;

use common::config::{AppConfig, OutputFormat};
use common::errors::{AppError, AppResult};
use client::DatabaseClient;
use oracle_client::OracleClient;
use service::ConnectivityService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "connectivity-check";

fn main() -> ExitCode {
    // Load .env file (if present) before anything else
    let dotenv = dotenvy::dotenv();

    // 初始化日志追踪
    init_tracing();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to parse .env, continuing with process environment"),
    }

    // 加载配置
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let format = OutputFormat::requested(|key| std::env::var(key).ok());
            return report_failure(e, format);
        }
    };

    tracing::info!(service = SERVICE_NAME, tables = config.tables.len(), "Starting connectivity check");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(OracleClient, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Progress lines must be visible before the failure report.
            if let Err(flush_err) = out.flush() {
                tracing::debug!(error = %flush_err, "Failed to flush progress output");
            }
            drop(out);
            report_failure(e, config.output)
        }
    }
}

fn run<C: DatabaseClient, W: Write>(client: C, config: &AppConfig, out: &mut W) -> AppResult<()> {
    let service = ConnectivityService::new(client);
    match config.output {
        OutputFormat::Text => {
            let report = service.run(config, out)?;
            render::write_text_summary(&report, out)?;
        }
        OutputFormat::Json => {
            let report = service.run(config, &mut io::sink())?;
            render::write_json_report(&report, out)?;
        }
    }
    Ok(())
}

fn report_failure(err: AppError, format: OutputFormat) -> ExitCode {
    tracing::debug!(code = err.error_code(), "Connectivity check failed");

    let written = match format {
        OutputFormat::Text => {
            let err = anyhow::Error::new(err).context("PhotoSight connectivity check failed");
            render::write_text_failure(&err, &mut io::stdout().lock(), &mut io::stderr().lock())
        }
        OutputFormat::Json => render::write_json_failure(&err, &mut io::stdout().lock()),
    };
    if let Err(e) = written {
        tracing::error!(error = %e, "Failed to write failure report");
    }
    ExitCode::FAILURE
}

/// Logs go to stderr so stdout only carries the report. `LOG_FORMAT=json`
/// switches to structured JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}
