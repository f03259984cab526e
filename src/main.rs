//! RAX FTP Client - Entry Point
//!
//! A minimal FTPS client performing one remote file operation per run.

use clap::Parser;
use log::info;

use rax_ftp_client::cli::{self, Cli};
use rax_ftp_client::error::handlers::{error_to_exit_code, handle_error};
use rax_ftp_client::utils::setup_logging;

#[tokio::main]
async fn main() {
    setup_logging();

    let cli = Cli::parse();
    info!("Launching FTP client...");

    let code = match cli::run(cli).await {
        Ok(outcome) if outcome.is_success() => 0,
        Ok(_) => 1,
        Err(e) => {
            handle_error(&e);
            error_to_exit_code(&e)
        }
    };

    std::process::exit(code);
}
