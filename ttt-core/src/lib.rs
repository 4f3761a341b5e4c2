//! 井字棋核心规则库
//!
//! 包含:
//! - 格子、玩家、位置等核心数据结构
//! - 棋盘状态机（落子、合法走法、胜负判定）
//! - 连线表和全盘扫描
//! - 棋盘记谱格式

mod board;
mod cell;
mod constants;
mod error;
pub mod lines;
mod notation;

pub use board::{GameState, Outcome};
pub use cell::{Cell, Position, Side};
pub use constants::*;
pub use error::{GameError, Result};
pub use notation::{Notation, INITIAL_NOTATION};
