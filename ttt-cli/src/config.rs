//! 命令行配置
//!
//! JSON 文件，缺失字段取默认值

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use ttt_ai::AiConfig;
use ttt_core::Side;

use crate::session::GameMode;

/// 命令行配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub ai: AiConfig,
    pub mode: GameMode,
    /// 人机模式下 AI 执哪一方
    pub ai_side: Side,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            ai: AiConfig::default(),
            mode: GameMode::PlayerVsAi,
            ai_side: Side::O,
        }
    }
}

impl CliConfig {
    /// 从文件加载配置；文件不存在时使用默认配置
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("配置文件不存在，使用默认配置: {:?}", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {:?}", path))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("配置文件格式无效: {:?}", path))?;
        config.ai.validate().context("AI 配置无效")?;

        tracing::info!("已加载配置: {:?}", path);
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化配置失败")?;
        fs::write(path, content).with_context(|| format!("写入配置文件失败: {:?}", path))?;

        tracing::info!("配置已保存: {:?}", path);
        Ok(())
    }
}
