use std::sync::Arc;

use clap::{Parser, Subcommand};
use danci_config::Config;

mod controller;
mod events;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "danci", about = "AI-backed Chinese vocabulary coach")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the lookup gateway server
    Serve,
    /// Interactive vocabulary session against a running gateway
    Repl,
    /// One-shot lookup, prints the raw gateway response
    Lookup { word: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::new();

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Repl => repl(config).await,
        Command::Lookup { word } => lookup_once(config, &word).await,
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(atty::is(atty::Stream::Stdout))
        .init();
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let backend = danci_gateway::OpenAiBackend::new(&config.backend);
    let state = danci_gateway::GatewayState {
        lookup: Arc::new(backend),
    };

    danci_gateway::serve(&config.gateway.bind_addr, state).await
}

async fn repl(config: Config) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested");
            controller.shutdown();
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => tracing::error!("task exited: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
            controller.shutdown();
        }
    }

    Ok(())
}

async fn lookup_once(config: Config, word: &str) -> anyhow::Result<()> {
    use danci_core::lookup::Lookup;

    let client = danci_gateway::GatewayClient::new(&config.gateway);
    let generated = client.generate(word).await?;
    println!("{}", serde_json::to_string_pretty(&generated)?);
    Ok(())
}
