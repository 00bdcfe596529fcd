//! rental-catalog binary entry point
//!
//! 无子命令或 `serve` 时启动 HTTP 服务，其余子命令走 CLI。

use clap::Parser;
use colored::Colorize;

use rental_catalog::cli::{Cli, Commands};
use rental_catalog::config::{get_config, init_config_from};
use rental_catalog::runtime::modes::{run_cli, run_server};
use rental_catalog::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(&cli.config);

    let command = cli.command.unwrap_or(Commands::Serve);

    // guard 必须活到进程结束，否则文件日志会丢尾
    let _log_guard = init_logging(&get_config().logging)?;

    if command.is_server() {
        if let Err(e) = run_server().await {
            eprintln!("{} {:#}", "Server error:".red().bold(), e);
            std::process::exit(1);
        }
        return Ok(());
    }

    if let Err(e) = run_cli(command).await {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }

    Ok(())
}
