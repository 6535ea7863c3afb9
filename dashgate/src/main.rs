//! dashgate Server Entry Point

use clap::Parser;
use dashgate::cli::{Cli, Commands};
use dashgate::config::{get_env_with_fallback_or, get_env_with_fallback_parse, GateConfig};
use dashgate::{logging, server, AppState};
use tracing::info;

struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = get_env_with_fallback_or("DASHGATE_HOST", "DASHGATE_HOST", "0.0.0.0");
        let port = get_env_with_fallback_parse("DASHGATE_PORT", "DASHGATE_PORT", 8080);
        Self { host, port }
    }

    fn from_args(host: String, port: u16) -> Self {
        Self { host, port }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Commands::Check(args)) = &cli.command {
        if let Err(e) = dashgate::cli::check::execute(args) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // 環境変数の解釈エラーを警告として出すため、設定の読み込みより先に初期化する
    if let Err(e) = logging::init() {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let server_config = match cli.command {
        Some(Commands::Serve(args)) => ServerConfig::from_args(args.host, args.port),
        // No subcommand - default to serve
        Some(Commands::Check(_)) | None => ServerConfig::from_env(),
    };
    run_server(server_config).await;
}

async fn run_server(server_config: ServerConfig) {
    let config = match GateConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::from_config(config);
    info!(
        audit_log = %state.gate.audit_log().path().display(),
        base_path = %state.config.base_path,
        "dashgate starting"
    );

    if let Err(e) = server::run(state, &server_config.bind_addr()).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
