use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "libris=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Login {
            token,
            email,
            password,
        } => cli::commands::login(config, token, email, password).await,
        Commands::Signup {
            email,
            password,
            role,
        } => cli::commands::signup(config, &email, password, role).await,
        Commands::Logout => cli::commands::logout(config).await,
        Commands::Whoami { format } => cli::commands::whoami(config, format).await,
        Commands::Header => cli::commands::header(config).await,
        Commands::Check { area } => cli::commands::check(config, area).await,
    }
}
