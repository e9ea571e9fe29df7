use std::path::PathBuf;
use std::process;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use tokio::task::LocalSet;
use tracing::info;

use bluetop::client::{HttpDataClient, MockDataClient};
use bluetop::tui::App;

// ============================================================
// CLI
// ============================================================

#[derive(Parser)]
#[command(name = "bluetop", about = "identity server inspector TUI", version = bluetop::VERSION)]
struct Args {
    /// Base URL of the identity server.
    #[arg(long, default_value = "http://localhost:8080", env = "BLUETOP_SERVER")]
    server: String,

    /// Request timeout in seconds.
    #[arg(long, default_value = "5", env = "BLUETOP_TIMEOUT")]
    timeout: u64,

    /// Auto-refresh interval in seconds, 0 disables.
    #[arg(long, default_value = "0", env = "BLUETOP_INTERVAL")]
    interval: u64,

    /// Run against built-in sample data instead of a server.
    #[arg(long)]
    demo: bool,

    /// Write logs to this file. Without it logging is off, since the
    /// terminal is taken over by the UI.
    #[arg(long, env = "BLUETOP_LOG")]
    log_file: Option<PathBuf>,
}

// ============================================================
// Main
// ============================================================

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        let file = match std::fs::File::create(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("failed to open log file {}: {}", path.display(), e);
                process::exit(1);
            }
        };
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "bluetop=info".parse().unwrap()),
            )
            .with_writer(std::sync::Arc::new(file))
            .with_ansi(false)
            .init();
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to build tokio runtime: {}", e);
            process::exit(1);
        }
    };

    let local = LocalSet::new();
    if let Err(e) = runtime.block_on(local.run_until(async_main(args))) {
        eprintln!("terminal error: {}", e);
        process::exit(1);
    }
}

async fn async_main(args: Args) -> std::io::Result<()> {
    let auto_refresh = match args.interval {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };

    if args.demo {
        info!(version = bluetop::VERSION, "starting with sample data");
        let client = Rc::new(MockDataClient::sample());
        return App::new(client, auto_refresh).run().await;
    }

    info!(version = bluetop::VERSION, server = %args.server, "starting");
    let client = match HttpDataClient::new(&args.server, Duration::from_secs(args.timeout)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("failed to build http client: {}", e);
            process::exit(1);
        }
    };
    App::new(Rc::new(client), auto_refresh).run().await
}
