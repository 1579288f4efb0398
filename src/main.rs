use clap::Parser;
use folderguard::cli::{Cli, Commands, LOG_ENV};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Lock {
            ref path,
            allow_weak,
        } => folderguard::cli::commands::lock::execute(&cli, path, allow_weak).await,
        Commands::Unlock { ref path } => {
            folderguard::cli::commands::unlock::execute(&cli, path).await
        }
        Commands::CheckPassword { json } => folderguard::cli::commands::check::execute(&cli, json),
    };

    if let Err(e) = result {
        folderguard::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr; only errors unless `FOLDERGUARD_LOG` says otherwise.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
