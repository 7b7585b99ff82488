pub mod cli;
pub mod commands;
pub mod ui;

pub use cli::{Cli, Commands};
pub use commands::get::GetCommand;
pub use commands::get::execute as run_get;
pub use commands::info::InfoCommand;
pub use commands::info::execute as run_info;
pub use commands::show::ShowCommand;
pub use commands::show::execute as run_show;
