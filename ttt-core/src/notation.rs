//! 棋盘记谱格式
//!
//! 仿照 FEN 的紧凑写法：
//! `<第一行>/<第二行>/<第三行> [走子方]`
//!
//! 示例：
//! `XX-/OO-/--- o`
//!
//! 格子用 `X`、`O`、`-` 表示（`_`、`.` 也视为空格）。
//! 省略走子方时按子数推断：双方子数相同则 X 走，否则 O 走。

use std::str::FromStr;

use crate::board::GameState;
use crate::cell::{Cell, Side};
use crate::constants::{BOARD_WIDTH, CELL_COUNT};
use crate::error::GameError;

/// 初始局面记谱
pub const INITIAL_NOTATION: &str = "---/---/--- x";

/// 记谱格式处理
pub struct Notation;

impl Notation {
    /// 解析记谱字符串为棋盘状态
    pub fn parse(notation: &str) -> Result<GameState, GameError> {
        let parts: Vec<&str> = notation.split_whitespace().collect();
        if parts.is_empty() {
            return Err(GameError::InvalidBoard {
                reason: "Empty board string".to_string(),
            });
        }
        if parts.len() > 2 {
            return Err(GameError::InvalidBoard {
                reason: format!("Expected at most 2 fields, got {}", parts.len()),
            });
        }

        let cells = Self::parse_cells(parts[0])?;

        let turn = match parts.get(1) {
            Some(field) => Self::parse_side(field)?,
            None => Self::infer_side(&cells)?,
        };

        GameState::from_cells(cells, turn)
    }

    /// 解析棋盘部分
    fn parse_cells(board_str: &str) -> Result<[Cell; CELL_COUNT], GameError> {
        let rows: Vec<&str> = board_str.split('/').collect();
        if rows.len() != BOARD_WIDTH {
            return Err(GameError::InvalidBoard {
                reason: format!("Expected {} rows, got {}", BOARD_WIDTH, rows.len()),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (row_idx, row) in rows.iter().enumerate() {
            let row_cells: Vec<char> = row.chars().collect();
            if row_cells.len() != BOARD_WIDTH {
                return Err(GameError::InvalidBoard {
                    reason: format!(
                        "Row {} has {} columns, expected {}",
                        row_idx,
                        row_cells.len(),
                        BOARD_WIDTH
                    ),
                });
            }

            for (col_idx, c) in row_cells.into_iter().enumerate() {
                cells[row_idx * BOARD_WIDTH + col_idx] =
                    Cell::from_char(c).ok_or_else(|| GameError::InvalidBoard {
                        reason: format!("Invalid cell character: {}", c),
                    })?;
            }
        }

        Ok(cells)
    }

    fn parse_side(field: &str) -> Result<Side, GameError> {
        let mut chars = field.chars();
        match (chars.next().and_then(Side::from_char), chars.next()) {
            (Some(side), None) => Ok(side),
            _ => Err(GameError::InvalidBoard {
                reason: format!("Invalid side to move: {}", field),
            }),
        }
    }

    /// 按子数推断走子方
    fn infer_side(cells: &[Cell; CELL_COUNT]) -> Result<Side, GameError> {
        let x_count = cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = cells.iter().filter(|&&c| c == Cell::O).count();

        if x_count == o_count {
            Ok(Side::X)
        } else if x_count == o_count + 1 {
            Ok(Side::O)
        } else {
            Err(GameError::InvalidBoard {
                reason: format!(
                    "Invalid piece counts: X={}, O={} (must be equal or X ahead by 1)",
                    x_count, o_count
                ),
            })
        }
    }

    /// 将棋盘状态转换为记谱字符串
    pub fn to_string(state: &GameState) -> String {
        format!(
            "{} {}",
            Self::cells_to_string(state.cells()),
            state.turn().to_char()
        )
    }

    /// 将棋盘转换为记谱棋盘部分
    pub fn cells_to_string(cells: &[Cell; CELL_COUNT]) -> String {
        cells
            .chunks(BOARD_WIDTH)
            .map(|row| row.iter().map(Cell::to_char).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl FromStr for GameState {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Notation::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Outcome;

    #[test]
    fn test_parse_initial() {
        let state = Notation::parse(INITIAL_NOTATION).unwrap();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_parse_with_explicit_side() {
        let state = Notation::parse("XX-/OO-/--- o").unwrap();
        assert_eq!(state.turn(), Side::O);
        assert_eq!(state.move_count(), 4);
        assert_eq!(state.legal_moves(), &[2, 5, 6, 7, 8]);
        assert!(!state.is_terminal());
        assert_eq!(state.cell(1, 0), Some(Cell::O));
    }

    #[test]
    fn test_parse_infers_side() {
        let state: GameState = "X--/-O-/---".parse().unwrap();
        assert_eq!(state.turn(), Side::X);

        let state: GameState = "X--/---/---".parse().unwrap();
        assert_eq!(state.turn(), Side::O);

        assert!(Notation::parse("XX-/---/---").is_err());
        assert!(Notation::parse("O--/---/---").is_err());
    }

    #[test]
    fn test_parse_detects_terminal() {
        let won = Notation::parse("XXX/OO-/---").unwrap();
        assert_eq!(won.outcome(), Some(Outcome::Win(Side::X)));

        let drawn = Notation::parse("XOX/XOO/OXX").unwrap();
        assert_eq!(drawn.outcome(), Some(Outcome::Draw));
        assert!(drawn.legal_moves().is_empty());
    }

    #[test]
    fn test_parse_accepts_alternate_blanks() {
        let a = Notation::parse("X__/_O_/___").unwrap();
        let b = Notation::parse("X../.O./...").unwrap();
        let c = Notation::parse("X--/-O-/---").unwrap();
        assert_eq!(a, c);
        assert_eq!(b, c);
    }

    #[test]
    fn test_invalid_notation() {
        // 行数不对
        assert!(Notation::parse("XXX/---").is_err());
        // 列数不对
        assert!(Notation::parse("XXXX/---/---").is_err());
        // 无效字符
        assert!(Notation::parse("XZ-/---/---").is_err());
        // 无效走子方
        assert!(Notation::parse("---/---/--- z").is_err());
        assert!(Notation::parse("---/---/--- xo").is_err());
        // 多余字段
        assert!(Notation::parse("---/---/--- x 1").is_err());
        // 空字符串
        assert!(Notation::parse("   ").is_err());
        // 双方都已连线
        assert!(Notation::parse("XXX/OOO/--- x").is_err());
    }

    #[test]
    fn test_notation_roundtrip_after_play() {
        let mut state = GameState::new();
        for mv in [4, 0, 8] {
            state.apply_move(mv).unwrap();
        }
        let text = Notation::to_string(&state);
        assert_eq!(text, "O--/-X-/--X o");

        let parsed = Notation::parse(&text).unwrap();
        assert_eq!(parsed.cells(), state.cells());
        assert_eq!(parsed.turn(), state.turn());
        assert_eq!(parsed.legal_moves(), state.legal_moves());
    }
}
