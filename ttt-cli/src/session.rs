//! 对局会话
//!
//! 负责把人类落子和 AI 落子交替作用到同一个棋盘上

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use ttt_ai::AiEngine;
use ttt_core::{GameError, GameState, Side};

/// 对局模式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// 人机对战
    #[default]
    PlayerVsAi,
    /// 双人对战
    PlayerVsPlayer,
    /// AI 自我对弈
    AiVsAi,
}

/// 会话错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 当前模式没有 AI 玩家
    #[error("No AI player in {0:?} mode")]
    NoAiPlayer(GameMode),

    /// 操作只适用于其他模式
    #[error("Not available in {0:?} mode")]
    WrongMode(GameMode),

    /// 规则错误
    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

impl SessionError {
    /// 调用方能否重新输入
    pub fn is_recoverable(&self) -> bool {
        match self {
            SessionError::NotYourTurn => true,
            SessionError::Game(e) => e.is_recoverable(),
            SessionError::NoAiPlayer(_) | SessionError::WrongMode(_) => false,
        }
    }
}

/// 对局会话
pub struct GameSession {
    mode: GameMode,
    /// 人机模式下 AI 执哪一方
    ai_side: Side,
    engine: AiEngine,
    state: GameState,
}

impl GameSession {
    /// 创建会话；人机模式下若 AI 先手会立即落子
    pub fn new(mode: GameMode, ai_side: Side, engine: AiEngine) -> Result<Self, SessionError> {
        let mut session = Self {
            mode,
            ai_side,
            engine,
            state: GameState::new(),
        };
        info!("新对局: 模式 {:?}, AI 执 {}", mode, ai_side);
        session.reply_if_due()?;
        Ok(session)
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 当前是否轮到 AI
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PlayerVsAi => self.state.turn() == self.ai_side,
            GameMode::PlayerVsPlayer => false,
            GameMode::AiVsAi => true,
        }
    }

    /// 人类落子；人机模式下随后由 AI 应答，返回 AI 的落子
    pub fn human_move(&mut self, index: usize) -> Result<Option<usize>, SessionError> {
        if self.state.is_terminal() {
            return Err(GameError::GameOver.into());
        }
        if self.is_ai_turn() {
            return Err(SessionError::NotYourTurn);
        }

        self.state.apply_move(index)?;
        debug!("人类落子: {}", index);

        self.reply_if_due()
    }

    /// 让 AI 以当前走子方身份走一步
    pub fn ai_move(&mut self) -> Result<Option<usize>, SessionError> {
        if self.mode == GameMode::PlayerVsPlayer {
            return Err(SessionError::NoAiPlayer(self.mode));
        }
        if !self.is_ai_turn() {
            return Err(SessionError::NotYourTurn);
        }

        let mv = self.engine.play_turn(&mut self.state)?;
        if let Some(index) = mv {
            debug!("AI 落子: {}", index);
        }
        if let Some(outcome) = self.state.outcome() {
            info!("对局结束: {}", outcome);
        }
        Ok(mv)
    }

    /// AI 自我对弈直到终局，返回全部走法
    pub fn run_to_end(&mut self) -> Result<Vec<usize>, SessionError> {
        if self.mode != GameMode::AiVsAi {
            return Err(SessionError::WrongMode(self.mode));
        }

        let mut moves = Vec::new();
        while !self.state.is_terminal() {
            match self.ai_move()? {
                Some(index) => moves.push(index),
                None => break,
            }
        }
        Ok(moves)
    }

    /// 重新开局；人机模式下若 AI 先手会立即落子
    pub fn reset(&mut self) -> Result<Option<usize>, SessionError> {
        self.state.reset();
        info!("重新开局");
        self.reply_if_due()
    }

    /// 状态文字，供界面显示
    pub fn status_text(&self) -> String {
        match self.state.outcome() {
            Some(outcome) => outcome.to_string(),
            None => format!("{} to move", self.state.turn()),
        }
    }

    /// 人机模式下轮到 AI 时自动应答
    fn reply_if_due(&mut self) -> Result<Option<usize>, SessionError> {
        if self.mode == GameMode::PlayerVsAi && !self.state.is_terminal() && self.is_ai_turn() {
            self.ai_move()
        } else {
            Ok(None)
        }
    }
}
