use clap::Parser;
use code_copilot::{OllamaConfig, ServiceConfig, ToolchainConfig};
use code_copilot_server::{create_app, run_server};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// Maximum number of concurrent executions
    #[arg(short, long, default_value = "10")]
    max_concurrent: usize,

    /// Ollama generate endpoint
    #[arg(long, env = "OLLAMA_URL", default_value = code_copilot::config::DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Model used when a request does not name one
    #[arg(long, env = "OLLAMA_MODEL", default_value = code_copilot::config::DEFAULT_MODEL)]
    model: String,

    /// Ollama request timeout in seconds
    #[arg(long, default_value = "180")]
    ollama_timeout: u64,

    /// Java compiler executable
    #[arg(long, default_value = "javac")]
    javac: String,

    /// Java runtime executable
    #[arg(long, default_value = "java")]
    java: String,

    /// Python interpreter executable
    #[arg(long, default_value = "python3")]
    python: String,

    /// Compile time limit in seconds
    #[arg(long, default_value = "20")]
    compile_timeout: u64,

    /// Run time limit in seconds
    #[arg(long, default_value = "10")]
    run_timeout: u64,

    /// Directory for per-request workspaces (defaults to the system temp dir)
    #[arg(long)]
    workspace_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut toolchain = ToolchainConfig::default()
        .with_javac(args.javac)
        .with_java(args.java)
        .with_python(args.python)
        .with_compile_timeout(Duration::from_secs(args.compile_timeout))
        .with_run_timeout(Duration::from_secs(args.run_timeout));
    if let Some(root) = args.workspace_root {
        toolchain = toolchain.with_workspace_root(root);
    }

    let config = ServiceConfig {
        toolchain,
        ollama: OllamaConfig::default()
            .with_api_url(args.ollama_url)
            .with_default_model(args.model)
            .with_request_timeout(Duration::from_secs(args.ollama_timeout)),
        max_concurrent_executions: args.max_concurrent,
    };

    let app = create_app(config)?;
    run_server(app, args.addr).await?;

    Ok(())
}
