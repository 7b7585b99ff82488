use crate::cli::ui::display_info;
use crate::config::IdentityConfig;
use crate::core::DeviceIdProvider;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "show", about = "Print the stored device id without creating one")]
pub struct ShowCommand {
    #[arg(short, long)]
    pub json: bool,
}

pub async fn execute(command: ShowCommand, config: &IdentityConfig) -> anyhow::Result<()> {
    let provider = DeviceIdProvider::new(config.open_store());

    let Some(device_id) = provider.peek().await? else {
        anyhow::bail!(
            "no device id stored in {}",
            config.store_path.display()
        );
    };

    if command.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&super::device_id_json(&device_id))?
        );
    } else {
        display_info(&format!("Device id: {}", device_id));
    }

    Ok(())
}
