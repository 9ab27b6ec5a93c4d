//! 连接检查工具公共模块
//!
//! 提供：
//! - 环境变量配置加载与校验
//! - 统一错误类型
//! - 连接配置与检查报告模型
//! - Oracle 标识符校验

pub mod config;
pub mod errors;
pub mod models;
pub mod utils;
