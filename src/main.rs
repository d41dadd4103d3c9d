mod app;
mod config;
mod domain;
mod models;
mod ui;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use gpui::{App, Application};
use log::info;

use crate::config::GameConfig;
use crate::ui::FileAssets;

/// Play White against an opponent that answers with random legal moves
#[derive(Parser, Debug)]
#[command(name = "random-reply-chess", version)]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pause before the opponent answers, in milliseconds
    #[arg(long)]
    reply_delay_ms: Option<u64>,

    /// Seed the opponent's move picker
    #[arg(long)]
    seed: Option<u64>,

    /// Print the config file's JSON schema and exit
    #[arg(long)]
    print_config_schema: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.print_config_schema {
        println!("{}", GameConfig::json_schema()?);
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(ms) = cli.reply_delay_ms {
        config.reply_delay_ms = ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;
    info!(
        "Starting: board {}px, reply delay {}ms, sprites in {}",
        config.board_size, config.reply_delay_ms, config.sprite_dir
    );

    Application::new()
        .with_assets(FileAssets::new(config.asset_root.clone()))
        .run(move |cx: &mut App| app::run(cx, config));
    Ok(())
}
