// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "mouse-strafing")]
#[command(about = "Replay scripted navigation sessions against a box scene", long_about = None)]
pub struct Cli {
    /// Replay script (JSON): scene boxes, starting view and timestamped input events
    #[arg(long)]
    pub script: PathBuf,

    /// Preferences file; defaults are used when omitted
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Scene state file with camera-state slots; created on save if missing
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Write the scene state back after the replay
    #[arg(long = "save-state", default_value = "false", requires = "state")]
    pub save_state: bool,

    /// Write adjusted preferences back after the replay
    #[arg(long = "save-prefs", default_value = "false", requires = "prefs")]
    pub save_prefs: bool,
}
