//! # Task Manager
//!
//! An interactive shell for to-do lists stored as individual JSON files.
//!
//! ## Key Features
//!
//! - **One file per list**: each list is `<name>.json` in the configured list directory
//! - **Single active list**: commands edit whichever list was last created or opened
//! - **Save on every change**: each command writes the list back immediately
//! - **Save-time policies**: optional purge of completed tasks and a name/file-name check
//!
//! ## Quick Start
//!
//! ```text
//! $ tm
//! Task-Manager|-> $ mkls groceries
//! Task-Manager|-> $ mktk milk 3
//! Task-Manager|-> $ vwls
//! groceries :
//!   Task 1 :
//!     Name: milk
//!     Importance (1-5): 3
//!     Is completed (true or false): false
//! Task-Manager|-> $ end
//! ```
//!
//! Settings live in `task_manager.config.json` in the starting directory (or
//! the path given with `--config`). Logging goes to stderr and is controlled
//! with `RUST_LOG`.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod cli;
pub mod cmd;
pub mod config;
pub mod console;
pub mod db;
pub mod error;
pub mod fields;
pub mod help;
pub mod project;
pub mod session;
pub mod task;

use cli::Cli;
use console::Console;
use session::Session;

/// Log to stderr so stdout stays the user's channel.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "tm=warn".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = match db::load_or_init_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    tracing::info!(
        config = %cli.config.display(),
        lists = %config.list_directory.display(),
        "starting session"
    );

    let mut session = Session::new(config, cli.config);
    let mut console = Console::stdio();
    if let Err(e) = cmd::run_repl(&mut session, &mut console) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
