use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lofid")]
#[command(about = "Lofi stream player daemon for the desktop", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Toggle playback, optionally submitting a new stream page URL
    Toggle(ToggleCliArgs),
    /// Step or set the playback volume
    Volume(VolumeCliArgs),
    /// Show the current playback status
    Status,
    /// Print version information
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct ToggleCliArgs {
    /// Page URL to play; starts the last-used URL when omitted
    pub url: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct VolumeCliArgs {
    #[command(subcommand)]
    pub command: VolumeCommand,
}

#[derive(Subcommand, Debug)]
pub enum VolumeCommand {
    /// Step the volume up by the configured step
    Up,
    /// Step the volume down by the configured step
    Down,
    /// Set an absolute volume
    Set {
        /// Volume in percent (0-100)
        value: u32,
    },
}
