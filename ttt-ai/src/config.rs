//! AI 配置

use serde::{Deserialize, Serialize};
use ttt_core::{GameError, Result};

/// 评估策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// 胜负 ±10，与层数无关
    Plain,
    /// 在 ±10 基础上偏好更快的胜利、更慢的失败
    #[default]
    DepthAware,
}

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub mode: SearchMode,
    /// 最大搜索层数，`None` 表示搜索到终局
    pub max_ply: Option<u32>,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                mode: SearchMode::Plain,
                max_ply: Some(2),
            },
            Difficulty::Medium => Self {
                difficulty,
                mode: SearchMode::DepthAware,
                max_ply: Some(4),
            },
            Difficulty::Hard => Self {
                difficulty,
                mode: SearchMode::DepthAware,
                max_ply: None,
            },
        }
    }

    /// 搜索到终局
    pub fn unbounded(mode: SearchMode) -> Self {
        Self {
            difficulty: Difficulty::Hard,
            mode,
            max_ply: None,
        }
    }

    /// 限制搜索层数
    pub fn with_max_ply(mut self, max_ply: u32) -> Self {
        self.max_ply = Some(max_ply);
        self
    }

    /// 校验配置：层数上限必须为正
    pub fn validate(&self) -> Result<()> {
        if self.max_ply == Some(0) {
            return Err(GameError::InvalidArgument {
                reason: "Maximum depth must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Hard)
    }
}
