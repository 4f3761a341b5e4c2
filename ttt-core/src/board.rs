//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Position, Side};
use crate::constants::{BOARD_WIDTH, CELL_COUNT};
use crate::error::{GameError, Result};
use crate::lines;

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// 某方连成一线
    Win(Side),
    /// 棋盘下满且无人连线
    Draw,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win(side) => write!(f, "{} Wins!", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// 完整的棋盘状态（包含走子方、步数、终局信息）
///
/// 搜索时通过 `Clone` 得到完全独立的副本，修改副本不会影响原状态。
/// 序列化时只保存格子、走子方和最近一步，其余字段在反序列化时重新推导。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GameStateRecord", into = "GameStateRecord")]
pub struct GameState {
    /// 3x3 棋盘，索引为 row * 3 + col
    cells: [Cell; CELL_COUNT],
    /// 当前走子方
    turn: Side,
    /// 已落子数
    move_count: u8,
    /// 是否已终局
    terminal: bool,
    /// 胜者，仅在终局时有意义（Empty 表示和棋）
    winner: Cell,
    /// 空格索引，升序
    available: Vec<usize>,
    /// 最近一步
    last_move: Option<usize>,
}

impl GameState {
    /// 创建初始状态
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            turn: Side::X,
            move_count: 0,
            terminal: false,
            winner: Cell::Empty,
            available: (0..CELL_COUNT).collect(),
            last_move: None,
        }
    }

    /// 从格子内容和走子方构造，终局状态通过全盘扫描得出
    ///
    /// 双方同时连成一线的棋盘不可达，返回 `InvalidBoard`。
    pub fn from_cells(cells: [Cell; CELL_COUNT], turn: Side) -> Result<Self> {
        if lines::has_line(&cells, Side::X) && lines::has_line(&cells, Side::O) {
            return Err(GameError::InvalidBoard {
                reason: "Both sides have a completed line".to_string(),
            });
        }

        let available: Vec<usize> = (0..CELL_COUNT).filter(|&i| cells[i].is_empty()).collect();
        let move_count = (CELL_COUNT - available.len()) as u8;

        let (terminal, winner) = match lines::full_scan_winner(&cells) {
            Some(side) => (true, side.to_cell()),
            None => (available.is_empty(), Cell::Empty),
        };

        Ok(Self {
            cells,
            turn,
            move_count,
            terminal,
            winner,
            available,
            last_move: None,
        })
    }

    /// 重置为初始状态
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 在指定格子落下当前走子方的棋子
    ///
    /// 终局后调用返回 `GameOver`；越界或格子已被占用返回 `InvalidMove`，
    /// 此时状态保持不变。
    pub fn apply_move(&mut self, index: usize) -> Result<()> {
        if self.terminal {
            return Err(GameError::GameOver);
        }

        let pos = Position::from_index(index).ok_or(GameError::InvalidMove { index })?;
        if !self.cells[index].is_empty() {
            return Err(GameError::InvalidMove { index });
        }

        let mover = self.turn;
        self.cells[index] = mover.to_cell();
        self.move_count += 1;
        self.available.retain(|&i| i != index);
        self.last_move = Some(index);

        if let Some(side) = lines::winner_through(&self.cells, pos) {
            self.winner = side.to_cell();
            self.terminal = true;
        } else if self.move_count as usize == CELL_COUNT {
            self.winner = Cell::Empty;
            self.terminal = true;
        }

        self.turn = mover.opponent();

        tracing::trace!(index, side = %mover, terminal = self.terminal, "move applied");
        Ok(())
    }

    /// 按行列落子
    pub fn apply_move_at(&mut self, row: u8, col: u8) -> Result<()> {
        let pos = Position::new(row, col).ok_or(GameError::InvalidMove {
            index: row as usize * BOARD_WIDTH + col as usize,
        })?;
        self.apply_move(pos.to_index())
    }

    /// 复制当前状态并落子，原状态不变
    pub fn with_move(&self, index: usize) -> Result<Self> {
        let mut next = self.clone();
        next.apply_move(index)?;
        Ok(next)
    }

    /// 深拷贝
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    /// 所有合法走法（升序，顺序稳定）
    pub fn legal_moves(&self) -> &[usize] {
        &self.available
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// 获取胜者，`None` 表示和棋；对局未结束时返回 `InvalidState`
    pub fn winner(&self) -> Result<Option<Side>> {
        if !self.terminal {
            return Err(GameError::InvalidState {
                reason: "TicTacToe is not over yet".to_string(),
            });
        }
        Ok(self.winner.side())
    }

    /// 对局结果，未结束时为 `None`
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.terminal {
            return None;
        }
        Some(match self.winner.side() {
            Some(side) => Outcome::Win(side),
            None => Outcome::Draw,
        })
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    /// 获取指定索引的格子
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// 获取指定行列的格子
    pub fn cell(&self, row: u8, col: u8) -> Option<Cell> {
        Position::new(row, col).map(|pos| self.cells[pos.to_index()])
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn move_count(&self) -> usize {
        self.move_count as usize
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }
}

/// `GameState` 的序列化形式
#[derive(Serialize, Deserialize)]
struct GameStateRecord {
    cells: [Cell; CELL_COUNT],
    turn: Side,
    #[serde(default)]
    last_move: Option<usize>,
}

impl TryFrom<GameStateRecord> for GameState {
    type Error = GameError;

    fn try_from(record: GameStateRecord) -> Result<Self> {
        let mut state = Self::from_cells(record.cells, record.turn)?;

        // 最近一步必须是对方的棋子
        if let Some(index) = record.last_move {
            if state.cell_at(index) != Some(record.turn.opponent().to_cell()) {
                return Err(GameError::InvalidBoard {
                    reason: format!("Last move {} was not played by the opponent", index),
                });
            }
            state.last_move = Some(index);
        }
        Ok(state)
    }
}

impl From<GameState> for GameStateRecord {
    fn from(state: GameState) -> Self {
        Self {
            cells: state.cells,
            turn: state.turn,
            last_move: state.last_move,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, chunk) in self.cells.chunks(BOARD_WIDTH).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = chunk.iter().map(|c| c.to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
