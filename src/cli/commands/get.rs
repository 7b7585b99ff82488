use crate::config::IdentityConfig;
use crate::core::DeviceIdProvider;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "get", about = "Print the device id, creating it on first use")]
pub struct GetCommand {
    #[arg(short, long)]
    pub json: bool,
}

pub async fn execute(command: GetCommand, config: &IdentityConfig) -> anyhow::Result<()> {
    let provider = DeviceIdProvider::new(config.open_store());
    let device_id = provider.get_or_create_device_id().await?;
    tracing::debug!("Resolved device id from {}", config.store_path.display());

    if command.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&super::device_id_json(&device_id))?
        );
    } else {
        println!("{}", device_id);
    }

    Ok(())
}
