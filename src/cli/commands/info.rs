use crate::config::IdentityConfig;
use crate::core::peek_device_id;
use crate::identity::DEVICE_ID_KEY;
use clap::Parser;
use comfy_table::Table;

#[derive(Parser, Debug)]
#[command(name = "info", about = "Describe the identity store")]
pub struct InfoCommand {}

pub async fn execute(_command: InfoCommand, config: &IdentityConfig) -> anyhow::Result<()> {
    let store = config.open_store();
    let exists = store.exists().await;

    let device_id = match peek_device_id(&store).await {
        Ok(Some(id)) => id.to_string(),
        Ok(None) => "<none>".to_string(),
        Err(e) => format!("<unreadable: {}>", e),
    };

    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Store".to_string(), store.path().display().to_string()]);
    table.add_row(vec!["Store exists".to_string(), exists.to_string()]);
    table.add_row(vec!["Key".to_string(), DEVICE_ID_KEY.to_string()]);
    table.add_row(vec!["Device id".to_string(), device_id]);

    println!("{table}");
    Ok(())
}
