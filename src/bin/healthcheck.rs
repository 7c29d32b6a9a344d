//! Container health-check probe.
//!
//! ECS runs this as the task definition's `healthCheck` command so the image
//! does not need curl. Exits 0 only on `200 {"status":"ok"}`.

use clap::Parser;
use envpromote_ecs_app::http::probe_health;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "envpromote-healthcheck")]
#[command(about = "Probe the service health endpoint", long_about = None)]
struct Cli {
    /// Port the service listens on, used when --url is not given.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Full health endpoint URL.
    #[arg(short, long)]
    url: Option<String>,

    /// Request timeout in milliseconds.
    #[arg(short, long, default_value_t = 2000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let url = cli
        .url
        .unwrap_or_else(|| format!("http://127.0.0.1:{}/health", cli.port));

    match probe_health(&url, Duration::from_millis(cli.timeout_ms)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("unhealthy: {e}");
            ExitCode::FAILURE
        }
    }
}
