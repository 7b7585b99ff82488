use clap::Parser;
use device_identity::IdentityConfig;
use device_identity::cli::ui::display_error;
use device_identity::cli::{Cli, Commands};
use device_identity::cli::{run_get, run_info, run_show};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = IdentityConfig::resolve(cli.store)?;

    match cli.command {
        Commands::Get(cmd) => {
            run_get(cmd, &config).await?;
        }
        Commands::Show(cmd) => {
            run_show(cmd, &config).await?;
        }
        Commands::Info(cmd) => {
            run_info(cmd, &config).await?;
        }
    }

    Ok(())
}
