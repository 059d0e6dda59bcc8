use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use lambda_gateway::config::load_config;
use lambda_gateway::observability::init_logging;
use lambda_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "lambda-gateway")]
#[command(about = "HTTP gateway that forwards requests to a remote compute function", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "gateway.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration problems are fatal before the handler comes online.
    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load {}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.observability.log_level);

    tracing::info!(
        config = %cli.config.display(),
        bind_address = %config.listener.bind_address,
        function = %config.function.name,
        endpoint = %config.function.endpoint,
        timeout = %config.function.timeout,
        "Configuration loaded"
    );

    let bind_address = config.listener.bind_address.clone();
    let server = match HttpServer::from_config(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize gateway");
            return ExitCode::FAILURE;
        }
    };

    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %bind_address, error = %e, "failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run(listener).await {
        tracing::error!(error = %e, "server exited with error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
