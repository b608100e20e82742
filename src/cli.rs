use std::path::PathBuf;

use clap::Parser;

use crate::config::CONFIG_FILE_NAME;

/// Interactive manager for file-backed to-do lists.
/// Lists live as JSON files in the directory named by the config file.
#[derive(Parser)]
#[command(name = "tm", version, about = "Interactive to-do list manager")]
pub struct Cli {
    /// Path to the JSON config file. Created with defaults if missing.
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,
}
