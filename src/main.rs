use clap::Parser;

use regionportal::cli::Cli;
use regionportal::config::{get_config, init_config};
use regionportal::runtime::modes::{run_cli, run_server};
use regionportal::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config();

    // CLI 模式：不初始化日志，错误以彩色文本输出
    if let Some(command) = cli.command {
        if let Err(e) = run_cli(command).await {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
        return Ok(());
    }

    // Server 模式
    let config = get_config();
    let _guard = init_logging(&config);

    run_server().await
}
