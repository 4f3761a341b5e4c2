//! 棋盘常量定义

/// 棋盘宽度（行数与列数相同）
pub const BOARD_WIDTH: usize = 3;

/// 格子总数
pub const CELL_COUNT: usize = BOARD_WIDTH * BOARD_WIDTH;

/// 每条连线的格子数
pub const LINE_LENGTH: usize = BOARD_WIDTH;
