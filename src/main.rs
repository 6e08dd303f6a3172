use clap::Parser;
use tracing_subscriber::EnvFilter;

use sounder::cli::{self, Args};
use sounder::output;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    if let Err(e) = cli::run(args).await {
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
