//! 格子、玩家与位置定义

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_WIDTH, CELL_COUNT};
use crate::error::GameError;

/// 格子内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// 空格
    #[default]
    Empty,
    /// X（先手）
    X,
    /// O（后手）
    O,
}

impl Cell {
    /// 是否为空格
    pub fn is_empty(&self) -> bool {
        *self == Cell::Empty
    }

    /// 占据该格子的玩家
    pub fn side(&self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Side::X),
            Cell::O => Some(Side::O),
        }
    }

    /// 记谱字符（空格为 `-`）
    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// 从记谱字符解析，`-`、`_`、`.` 都表示空格
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' | '_' | '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// X（先手）
    X,
    /// O（后手）
    O,
}

impl Side {
    /// 获取对手
    pub fn opponent(&self) -> Side {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// 该玩家落子后的格子内容
    pub fn to_cell(&self) -> Cell {
        match self {
            Side::X => Cell::X,
            Side::O => Cell::O,
        }
    }

    /// 记谱中的走子方字符
    pub fn to_char(&self) -> char {
        match self {
            Side::X => 'x',
            Side::O => 'o',
        }
    }

    /// 从走子方字符解析
    pub fn from_char(c: char) -> Option<Side> {
        match c {
            'x' | 'X' => Some(Side::X),
            'o' | 'O' => Some(Side::O),
            _ => None,
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        side.to_cell()
    }
}

impl TryFrom<Cell> for Side {
    type Error = GameError;

    fn try_from(cell: Cell) -> Result<Self, Self::Error> {
        cell.side().ok_or_else(|| GameError::InvalidArgument {
            reason: "Player should be X or O only".to_string(),
        })
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_cell())
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-2)
    pub row: u8,
    /// 列 (0-2)
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_WIDTH && (col as usize) < BOARD_WIDTH {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// 从线性索引转换（行优先）
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            Some(Self {
                row: (index / BOARD_WIDTH) as u8,
                col: (index % BOARD_WIDTH) as u8,
            })
        } else {
            None
        }
    }

    /// 转换为线性索引
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_WIDTH + self.col as usize
    }

    /// 是否在主对角线（左上到右下）上
    pub fn on_main_diagonal(&self) -> bool {
        self.row == self.col
    }

    /// 是否在副对角线（右上到左下）上
    pub fn on_anti_diagonal(&self) -> bool {
        self.row as usize + self.col as usize == BOARD_WIDTH - 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
