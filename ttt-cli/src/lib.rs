//! 井字棋命令行外壳
//!
//! 包含:
//! - 对局会话（人机 / 双人 / 机机）
//! - 配置文件加载

pub mod config;
pub mod session;

pub use config::CliConfig;
pub use session::{GameMode, GameSession, SessionError};
