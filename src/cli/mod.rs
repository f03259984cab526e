//! Command-line front end
//!
//! Turns parsed arguments and configuration into a single client run.

pub mod args;
pub mod location;

pub use args::{Cli, CliCommand};

use log::{info, warn};

use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::FtpClientError;
use crate::session::TlsConnector;
use crate::transfer::{LocalFs, Outcome};

/// Loads configuration, validates the arguments and runs the operation over TLS.
pub async fn run(cli: Cli) -> Result<Outcome, FtpClientError> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(name) = cli.server_name {
        config.tls_server_name = Some(name);
        config.validate()?;
    }

    let request = cli.command.to_request(config.default_port)?;
    let local = LocalFs::new(config.download_dir_path());
    let mut stdout = tokio::io::stdout();

    let outcome = Client::new(config, TlsConnector::new()?)
        .run(&request, &local, &mut stdout)
        .await?;

    if outcome.is_success() {
        info!("{}", outcome);
    } else {
        warn!("{}", outcome);
    }
    Ok(outcome)
}
