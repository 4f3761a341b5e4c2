//! 错误类型定义

use thiserror::Error;

/// 井字棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 游戏已结束，不能再落子
    #[error("Game over, no more moves can be played")]
    GameOver,

    /// 无效的落子（越界或格子已被占用）
    #[error("Invalid move: cell {index} is out of range or already occupied")]
    InvalidMove { index: usize },

    /// 无效的参数
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// 当前状态不支持该操作
    #[error("Invalid state: {reason}")]
    InvalidState { reason: String },

    /// 无效的棋盘字符串
    #[error("Invalid board string: {reason}")]
    InvalidBoard { reason: String },
}

impl GameError {
    /// 调用方能否直接重试（例如重新选择格子）
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::InvalidMove { .. })
    }
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
