pub mod args;
pub mod client;
pub mod control;

pub use args::{Cli, CliCommand};
pub use control::{handle_status_command, handle_toggle_command, handle_volume_command};
