//! Artifact registry plugin binary entry point

#[path = "../cli/mod.rs"]
mod cli;

use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() {
    // Parse CLI arguments and PLUGIN_* environment variables
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Handle help and version requests
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                let _ = e.print();
                std::process::exit(0);
            } else {
                let _ = e.print();
                std::process::exit(2);
            }
        }
    };

    match cli.execute().await {
        Ok(()) => {
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}
