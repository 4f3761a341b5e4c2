use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttt_ai::{AiConfig, AiEngine, Difficulty};
use ttt_cli::{CliConfig, GameMode, GameSession};
use ttt_core::{Notation, Side};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn parse_side(s: &str) -> Result<Side, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Side::from_char(c).ok_or_else(|| format!("无效的玩家: {}", s)),
        _ => Err(format!("无效的玩家: {}", s)),
    }
}

#[derive(Parser, Debug)]
#[command(name = "ttt", about = "井字棋对弈")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "ttt.json")]
    config: PathBuf,

    /// 对局模式，覆盖配置文件
    #[arg(short, long, value_enum)]
    mode: Option<GameMode>,

    /// 依次落子的格子索引 (0-8)，如 4,0,8
    #[arg(long, value_delimiter = ',')]
    moves: Vec<usize>,

    /// 难度，覆盖配置文件
    #[arg(short, long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// AI 执哪一方 (x / o)
    #[arg(long, value_parser = parse_side)]
    ai_side: Option<Side>,
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ttt_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = CliConfig::load(&args.config)?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(difficulty) = args.difficulty {
        config.ai = AiConfig::from_difficulty(difficulty.into());
    }
    if let Some(side) = args.ai_side {
        config.ai_side = side;
    }

    let engine = AiEngine::new(config.ai.clone()).context("AI 配置无效")?;
    let mut session = GameSession::new(config.mode, config.ai_side, engine)?;

    match config.mode {
        GameMode::AiVsAi => {
            if !args.moves.is_empty() {
                warn!("AI 自我对弈模式忽略 --moves");
            }
            let moves = session.run_to_end()?;
            info!("走法: {:?}", moves);
        }
        GameMode::PlayerVsAi | GameMode::PlayerVsPlayer => {
            for &index in &args.moves {
                if session.state().is_terminal() {
                    warn!("对局已结束，忽略剩余走法");
                    break;
                }
                match session.human_move(index) {
                    Ok(Some(reply)) => info!("{} -> AI {}", index, reply),
                    Ok(None) => info!("{}", index),
                    Err(e) if e.is_recoverable() => warn!("走法被拒绝: {}", e),
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    println!("{}", session.state());
    println!("{}", Notation::to_string(session.state()));
    println!("{}", session.status_text());

    Ok(())
}
