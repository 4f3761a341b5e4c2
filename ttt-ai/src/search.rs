//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝，可选层数限制

use tracing::debug;
use ttt_core::{Cell, GameError, GameState, Result, Side};

use crate::config::{AiConfig, Difficulty, SearchMode};
use crate::evaluate::Evaluator;

/// 搜索结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// 最佳走法
    ///
    /// 未终局的局面至少有一个空格，而终局局面在搜索前就被拒绝，
    /// 所以成功返回的结果总是 `Some`。
    pub best_move: Option<usize>,
    /// 根节点分值（`maximizing` 视角）
    pub score: i32,
    /// 搜索的节点数
    pub nodes: u64,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            nodes_searched: 0,
        })
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            config: AiConfig::from_difficulty(difficulty),
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索 `maximizing` 视角下的最佳走法，不修改 `state`
    ///
    /// 走法属于 `state` 当前的走子方，但每一步的分值都以 `maximizing` 为准。
    pub fn search(&mut self, state: &GameState, maximizing: Cell) -> Result<SearchResult> {
        if state.is_terminal() {
            return Err(GameError::GameOver);
        }
        let side = Side::try_from(maximizing)?;

        self.nodes_searched = 0;
        let (score, best_move) = self.alpha_beta(side, state, i32::MIN, i32::MAX, 0)?;

        let result = SearchResult {
            best_move,
            score,
            nodes: self.nodes_searched,
        };
        debug!(
            "search done: side={}, mode={:?}, max_ply={:?}, best={:?}, score={}, nodes={}",
            side,
            self.config.mode,
            self.config.max_ply,
            result.best_move,
            result.score,
            result.nodes
        );
        Ok(result)
    }

    /// 搜索并把最佳走法落到 `state` 上，返回落下的格子
    ///
    /// 没有合法走法的局面（棋盘已满）必然已终局，返回 `GameOver` 且不落子。
    pub fn play(&mut self, state: &mut GameState, maximizing: Cell) -> Result<Option<usize>> {
        let result = self.search(state, maximizing)?;
        if let Some(index) = result.best_move {
            state.apply_move(index)?;
        }
        Ok(result.best_move)
    }

    /// 以当前走子方为 `maximizing` 走一步
    pub fn play_turn(&mut self, state: &mut GameState) -> Result<Option<usize>> {
        let side = state.turn();
        self.play(state, side.to_cell())
    }

    /// Alpha-Beta 搜索，返回 (分值, 本节点最佳走法)
    fn alpha_beta(
        &mut self,
        side: Side,
        state: &GameState,
        alpha: i32,
        beta: i32,
        ply: u32,
    ) -> Result<(i32, Option<usize>)> {
        self.nodes_searched += 1;

        // 到达层数限制或终局，返回评估值
        if self.ply_exhausted(ply) || state.is_terminal() {
            return Ok((self.evaluate(side, state, ply), None));
        }

        if state.turn() == side {
            self.max_node(side, state, alpha, beta, ply)
        } else {
            self.min_node(side, state, alpha, beta, ply)
        }
    }

    /// 极大节点：只在分值严格更高时更新，平分保留先找到的走法
    fn max_node(
        &mut self,
        side: Side,
        state: &GameState,
        mut alpha: i32,
        beta: i32,
        ply: u32,
    ) -> Result<(i32, Option<usize>)> {
        let mut best_move = None;

        for &mv in state.legal_moves() {
            let child = state.with_move(mv)?;
            let (score, _) = self.alpha_beta(side, &child, alpha, beta, ply + 1)?;

            if score > alpha {
                alpha = score;
                best_move = Some(mv);
            }
            // 剪枝
            if alpha >= beta {
                break;
            }
        }

        Ok((alpha, best_move))
    }

    fn min_node(
        &mut self,
        side: Side,
        state: &GameState,
        alpha: i32,
        mut beta: i32,
        ply: u32,
    ) -> Result<(i32, Option<usize>)> {
        let mut best_move = None;

        for &mv in state.legal_moves() {
            let child = state.with_move(mv)?;
            let (score, _) = self.alpha_beta(side, &child, alpha, beta, ply + 1)?;

            if score < beta {
                beta = score;
                best_move = Some(mv);
            }
            if alpha >= beta {
                break;
            }
        }

        Ok((beta, best_move))
    }

    fn ply_exhausted(&self, ply: u32) -> bool {
        matches!(self.config.max_ply, Some(max_ply) if ply >= max_ply)
    }

    fn evaluate(&self, side: Side, state: &GameState, ply: u32) -> i32 {
        match self.config.mode {
            SearchMode::Plain => Evaluator::terminal_score(side, state),
            SearchMode::DepthAware => Evaluator::terminal_score_at_ply(side, state, ply),
        }
    }

    /// 获取上次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

/// 按 `config` 搜索并把最佳走法落到 `state` 上
pub fn select_and_apply_move(
    state: &mut GameState,
    maximizing: Cell,
    config: AiConfig,
) -> Result<Option<usize>> {
    AiEngine::new(config)?.play(state, maximizing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use ttt_core::{Notation, Outcome};

    fn state(notation: &str) -> GameState {
        notation.parse().unwrap()
    }

    fn engine(mode: SearchMode) -> AiEngine {
        AiEngine::new(AiConfig::unbounded(mode)).unwrap()
    }

    /// 不剪枝的完整 Minimax，作为对照
    fn minimax(side: Side, state: &GameState, ply: u32, mode: SearchMode, nodes: &mut u64) -> i32 {
        *nodes += 1;
        if state.is_terminal() {
            return match mode {
                SearchMode::Plain => Evaluator::terminal_score(side, state),
                SearchMode::DepthAware => Evaluator::terminal_score_at_ply(side, state, ply),
            };
        }

        let scores = state
            .legal_moves()
            .iter()
            .map(|&mv| minimax(side, &state.with_move(mv).unwrap(), ply + 1, mode, nodes));

        if state.turn() == side {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn reachable_states() -> Vec<GameState> {
        let mut seen = HashSet::new();
        let mut stack = vec![GameState::new()];
        let mut result = Vec::new();
        while let Some(state) = stack.pop() {
            if !seen.insert((*state.cells(), state.turn())) {
                continue;
            }
            if !state.is_terminal() {
                for &mv in state.legal_moves() {
                    stack.push(state.with_move(mv).unwrap());
                }
            }
            result.push(state);
        }
        result
    }

    #[test]
    fn test_takes_immediate_win() {
        // O 完成第二行
        let mut live = state("XX-/OO-/--- o");
        let mut engine = engine(SearchMode::DepthAware);

        let mv = engine.play(&mut live, Cell::O).unwrap();
        assert_eq!(mv, Some(5));
        assert!(live.is_terminal());
        assert_eq!(live.winner(), Ok(Some(Side::O)));
    }

    #[test]
    fn test_single_legal_move_draw() {
        let mut live = state("XOX/OXO/OX- o");
        assert_eq!(live.legal_moves(), &[8]);

        let mut engine = engine(SearchMode::DepthAware);
        let mv = engine.play_turn(&mut live).unwrap();
        assert_eq!(mv, Some(8));
        assert!(live.is_terminal());
        assert_eq!(live.winner(), Ok(None));
    }

    #[test]
    fn test_never_allows_forced_loss_after_center_reply() {
        let live = state("X--/-O-/--- x");
        for mode in [SearchMode::Plain, SearchMode::DepthAware] {
            let result = engine(mode).search(&live, Cell::X).unwrap();
            let mv = result.best_move.unwrap();

            // 落子后局面在完美对弈下至少是和棋
            let after = live.with_move(mv).unwrap();
            let mut nodes = 0;
            assert!(minimax(Side::X, &after, 1, SearchMode::Plain, &mut nodes) >= 0);
            assert_eq!(result.score, 0);
        }
    }

    #[test]
    fn test_depth_aware_prefers_faster_win() {
        // X 走 2 形成双杀（第 3 层胜），走 8 直接获胜（第 1 层胜）
        let live = state("XO-/OX-/--- x");

        let plain = engine(SearchMode::Plain).search(&live, Cell::X).unwrap();
        assert_eq!(plain.best_move, Some(2));
        assert_eq!(plain.score, 10);

        let aware = engine(SearchMode::DepthAware).search(&live, Cell::X).unwrap();
        assert_eq!(aware.best_move, Some(8));
        assert_eq!(aware.score, 9);
    }

    #[test]
    fn test_depth_aware_delays_loss() {
        // X 威胁 5；O 在任何情况下都会输，但堵住 5 可以拖到第 4 层
        let live = state("--X/---/-OX o");

        let plain = engine(SearchMode::Plain).search(&live, Cell::O).unwrap();
        assert_eq!(plain.score, -10);
        assert_eq!(plain.best_move, Some(0));

        let aware = engine(SearchMode::DepthAware).search(&live, Cell::O).unwrap();
        assert_eq!(aware.best_move, Some(5));
        assert_eq!(aware.score, -6);
    }

    #[test]
    fn test_self_play_from_empty_is_draw() {
        for mode in [SearchMode::Plain, SearchMode::DepthAware] {
            let mut live = GameState::new();
            let mut engine = engine(mode);
            let mut moves = Vec::new();

            while !live.is_terminal() {
                moves.push(engine.play_turn(&mut live).unwrap().unwrap());
            }

            assert_eq!(live.outcome(), Some(Outcome::Draw));
            assert_eq!(moves, vec![0, 4, 1, 2, 6, 3, 5, 7, 8]);
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let live = state("X--/-O-/--- x");
        let mut engine = engine(SearchMode::DepthAware);
        let first = engine.search(&live, Cell::X).unwrap();
        for _ in 0..5 {
            assert_eq!(engine.search(&live, Cell::X).unwrap(), first);
        }
    }

    #[test]
    fn test_search_does_not_touch_state() {
        let live = state("X--/-O-/--- x");
        let snapshot = live.clone();
        engine(SearchMode::DepthAware).search(&live, Cell::X).unwrap();
        assert_eq!(live, snapshot);
    }

    #[test]
    fn test_alpha_beta_matches_minimax_everywhere() {
        for live in reachable_states() {
            if live.is_terminal() {
                continue;
            }
            let side = live.turn();

            for mode in [SearchMode::Plain, SearchMode::DepthAware] {
                let result = engine(mode).search(&live, side.to_cell()).unwrap();
                let chosen = result.best_move.unwrap();

                let mut nodes = 0;
                let mut best = i32::MIN;
                let mut chosen_score = None;
                for &mv in live.legal_moves() {
                    let child = live.with_move(mv).unwrap();
                    let score = minimax(side, &child, 1, mode, &mut nodes);
                    best = best.max(score);
                    if mv == chosen {
                        chosen_score = Some(score);
                    }
                }

                assert_eq!(
                    result.score,
                    best,
                    "root value differs at {}",
                    Notation::to_string(&live)
                );
                assert_eq!(
                    chosen_score,
                    Some(best),
                    "suboptimal move {} at {}",
                    chosen,
                    Notation::to_string(&live)
                );
            }
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes() {
        let live = GameState::new();
        let mut engine = engine(SearchMode::Plain);
        let result = engine.search(&live, Cell::X).unwrap();

        let mut brute_nodes = 0;
        let value = minimax(Side::X, &live, 0, SearchMode::Plain, &mut brute_nodes);

        assert_eq!(result.score, value);
        assert_eq!(engine.nodes_searched(), result.nodes);
        assert!(result.nodes < brute_nodes);
        assert_eq!(brute_nodes, 549_946);
    }

    #[test]
    fn test_ply_limit() {
        // 1 层只看直接结果，空棋盘所有走法都是 0 分，选第一个
        let live = GameState::new();
        let config = AiConfig::unbounded(SearchMode::Plain).with_max_ply(1);
        let mut engine = AiEngine::new(config).unwrap();
        let result = engine.search(&live, Cell::X).unwrap();
        assert_eq!(result.best_move, Some(0));
        assert_eq!(result.score, 0);
        assert_eq!(result.nodes, 10);
    }

    #[test]
    fn test_easy_still_takes_immediate_win() {
        let mut live = state("XO-/OX-/--- x");
        let mut engine = AiEngine::from_difficulty(Difficulty::Easy);
        assert_eq!(engine.play_turn(&mut live).unwrap(), Some(8));
        assert_eq!(live.winner(), Ok(Some(Side::X)));
    }

    #[test]
    fn test_minimizing_root() {
        // X 走，但以 O 视角打分
        let live = state("X--/-O-/--- x");
        let result = engine(SearchMode::DepthAware).search(&live, Cell::O).unwrap();
        let mv = result.best_move.unwrap();
        assert!(live.legal_moves().contains(&mv));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_invalid_arguments() {
        let mut live = GameState::new();
        let mut engine = engine(SearchMode::Plain);

        assert!(matches!(
            engine.search(&live, Cell::Empty),
            Err(GameError::InvalidArgument { .. })
        ));
        assert!(matches!(
            AiEngine::new(AiConfig::default().with_max_ply(0)),
            Err(GameError::InvalidArgument { .. })
        ));
        let zero_ply = AiConfig::default().with_max_ply(0);
        assert!(select_and_apply_move(&mut live, Cell::X, zero_ply).is_err());
        assert_eq!(live, GameState::new());
    }

    #[test]
    fn test_terminal_state_rejected() {
        let mut live = state("XXX/OO-/---");
        let before = live.clone();
        assert_eq!(
            engine(SearchMode::Plain).play(&mut live, Cell::O),
            Err(GameError::GameOver)
        );
        assert_eq!(live, before);
    }

    #[test]
    fn test_full_board_applies_nothing() {
        let mut live = state("XOX/XOO/OXX");
        assert!(live.legal_moves().is_empty());
        let before = live.clone();

        assert_eq!(
            select_and_apply_move(&mut live, Cell::X, AiConfig::default()),
            Err(GameError::GameOver)
        );
        assert_eq!(live, before);
    }

    #[test]
    fn test_select_and_apply_move() {
        let mut live = state("XX-/OO-/--- x");
        let mv = select_and_apply_move(&mut live, Cell::X, AiConfig::default()).unwrap();
        assert_eq!(mv, Some(2));
        assert_eq!(live.winner(), Ok(Some(Side::X)));
    }

    #[test]
    fn test_search_logs_with_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let live = state("XX-/OO-/--- o");
            let result = engine(SearchMode::DepthAware).search(&live, Cell::O).unwrap();
            assert_eq!(result.best_move, Some(5));
        });
    }
}
