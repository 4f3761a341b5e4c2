//! 局面评估函数

use ttt_core::{Cell, GameState, Outcome, Result, Side};

/// 胜负基础分值
pub const WIN_SCORE: i32 = 10;

/// 评估器
///
/// 只对终局打分；未终局（包括层数截断）一律记 0 分。
pub struct Evaluator;

impl Evaluator {
    /// 以 `maximizing` 视角评估：胜 +10，负 -10，其余 0
    pub fn score(maximizing: Cell, state: &GameState) -> Result<i32> {
        let side = Side::try_from(maximizing)?;
        Ok(Self::terminal_score(side, state))
    }

    /// 考虑深度的评估：越早获胜分越高，越晚失败分越高
    pub fn score_at_ply(maximizing: Cell, state: &GameState, ply: u32) -> Result<i32> {
        let side = Side::try_from(maximizing)?;
        Ok(Self::terminal_score_at_ply(side, state, ply))
    }

    pub(crate) fn terminal_score(side: Side, state: &GameState) -> i32 {
        match state.outcome() {
            Some(Outcome::Win(winner)) if winner == side => WIN_SCORE,
            Some(Outcome::Win(_)) => -WIN_SCORE,
            Some(Outcome::Draw) | None => 0,
        }
    }

    pub(crate) fn terminal_score_at_ply(side: Side, state: &GameState, ply: u32) -> i32 {
        // 最多 9 层，扣减后符号不变
        let ply = ply as i32;
        match Self::terminal_score(side, state) {
            score if score > 0 => score - ply,
            score if score < 0 => score + ply,
            _ => 0,
        }
    }
}
