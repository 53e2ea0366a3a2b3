mod config;
mod errors;
mod logging;
mod mcp;
mod security;
mod server;
mod tools;

use crate::config::Config;
use crate::tools::FileOps;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "fsgate")]
#[command(about = "Sandboxed filesystem tools over an MCP-style HTTP endpoint")]
struct Cli {
    /// Config file (TOML, or JSON by extension)
    #[arg(long, env = "FSGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory every tool path is confined to
    #[arg(long, env = "FSGATE_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "FSGATE_BIND")]
    bind: Option<String>,

    /// Port to listen on
    #[arg(long, env = "FSGATE_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut cfg = Config::load_or_default(cli.config.as_deref()).context("loading config")?;
    if let Some(dir) = cli.base_dir {
        cfg.root.base_dir = dir;
    }
    if let Some(bind) = cli.bind {
        cfg.server.bind_addr = bind;
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    cfg.validate().context("validating config")?;

    let base_dir = cfg.prepare_base_dir().context("preparing base directory")?;
    let ops = FileOps::new(&base_dir);

    let addr = format!("{}:{}", cfg.server.bind_addr, cfg.server.port);
    info!(addr = %addr, base_dir = %ops.base_dir().display(), base_path = %cfg.server.base_path, "fsgate ready");
    println!(
        "fsgate ready addr={} base_dir={} endpoint={}",
        addr,
        ops.base_dir().display(),
        cfg.server.base_path
    );

    server::serve(cfg, ops).await
}
