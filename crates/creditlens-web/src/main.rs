use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use creditlens_core::{CompanyRepository, Dataset, EngineConfig, QueryFacade};
use creditlens_web::{create_app, AppState, ServerConfig, ServerError};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "creditlens=info,creditlens_core=info,creditlens_web=info,tower_http=info";

/// Corporate credit intelligence API server.
#[derive(Debug, Parser)]
#[command(name = "creditlens", version, about = "Credit intelligence API server")]
struct Cli {
    /// Interface to bind (overrides CREDITLENS_HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Company dataset JSON file. Uses the bundled dataset when omitted.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Live feed tick period in milliseconds (overrides CREDITLENS_STREAM_PERIOD_MS).
    #[arg(long)]
    stream_period_ms: Option<u64>,

    /// Requests allowed per client IP per 15 minute window.
    #[arg(long)]
    rate_limit_max: Option<u32>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    init_tracing(cli.log_format)?;

    let mut server = ServerConfig::from_env();
    if let Some(host) = cli.host {
        server.host = host;
    }
    if let Some(port) = cli.port {
        server.port = port;
    }
    if let Some(max) = cli.rate_limit_max {
        server.rate_limit_max = max;
    }

    let mut engine = EngineConfig::from_env();
    if let Some(period_ms) = cli.stream_period_ms {
        engine = engine.with_stream_period(Duration::from_millis(period_ms));
    }

    let dataset = match &cli.dataset {
        Some(path) => Dataset::from_path(path)?,
        None => Dataset::bundled()?,
    };
    info!(companies = dataset.len(), "dataset loaded");

    let facade = QueryFacade::new(Arc::new(CompanyRepository::new(dataset)), engine)?;
    let app = create_app(AppState::new(facade), &server);

    let addr = server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(%addr, "creditlens API server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_tracing(format: LogFormat) -> Result<(), ServerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_FILTER)
            .map_err(|err| ServerError::LogFilter(err.to_string()))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}
