//! 连线判定
//!
//! 落子后只需检查经过该格的行、列和（若适用）两条对角线；
//! `full_scan_winner` 扫描全部 8 条连线，用于记谱解析和一致性校验。

use crate::cell::{Cell, Position, Side};
use crate::constants::{BOARD_WIDTH, CELL_COUNT};

/// 全部 8 条连线（行优先索引）
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // 行
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // 列
    [0, 4, 8],
    [2, 4, 6], // 对角线
];

/// 连线的归属：三格同为某一玩家时返回该玩家
pub fn line_owner(cells: &[Cell; CELL_COUNT], line: &[usize; 3]) -> Option<Side> {
    let first = cells[line[0]];
    if line.iter().all(|&idx| cells[idx] == first) {
        first.side()
    } else {
        None
    }
}

/// 经过指定格子的连线（2 到 4 条）
pub fn lines_through(pos: Position) -> impl Iterator<Item = [usize; 3]> {
    let row = pos.row as usize;
    let col = pos.col as usize;
    let w = BOARD_WIDTH;

    let row_line = Some([row * w, row * w + 1, row * w + 2]);
    let col_line = Some([col, col + w, col + 2 * w]);
    let main = pos.on_main_diagonal().then_some([0, 4, 8]);
    let anti = pos.on_anti_diagonal().then_some([2, 4, 6]);

    [row_line, col_line, main, anti].into_iter().flatten()
}

/// 只检查经过 `pos` 的连线
pub fn winner_through(cells: &[Cell; CELL_COUNT], pos: Position) -> Option<Side> {
    lines_through(pos).find_map(|line| line_owner(cells, &line))
}

/// 扫描全部连线
pub fn full_scan_winner(cells: &[Cell; CELL_COUNT]) -> Option<Side> {
    WINNING_LINES
        .iter()
        .find_map(|line| line_owner(cells, line))
}

/// 指定玩家是否已完成任意一条连线
pub fn has_line(cells: &[Cell; CELL_COUNT], side: Side) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| line_owner(cells, line) == Some(side))
}
