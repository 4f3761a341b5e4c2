//! 井字棋 AI 引擎
//!
//! 包含:
//! - 局面评估函数（普通 / 考虑深度）
//! - Minimax + Alpha-Beta 搜索
//! - 难度与搜索配置

mod config;
mod evaluate;
mod search;

pub use config::{AiConfig, Difficulty, SearchMode};
pub use evaluate::{Evaluator, WIN_SCORE};
pub use search::{select_and_apply_move, AiEngine, SearchResult};
