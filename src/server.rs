use crate::config::{log_config, Config};
use crate::core_auth::{CredentialStore, PasswdStore};
use crate::core_ftpcommand::handlers::initialize_command_handlers;
use crate::core_network::network;
use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;

/// Runs the FTP server with the provided configuration.
///
/// The credential store is loaded here before the listener starts and is
/// released when this function returns, after the accept loop has stopped.
///
/// # Arguments
///
/// * `config` - The server configuration.
///
/// # Returns
///
/// Result<(), anyhow::Error> indicating the success or failure of the operation.
pub async fn run(config: Config) -> Result<()> {
    info!("Starting server with config:");
    log_config(&config);

    let store = PasswdStore::load(&config.server.passwd_file).with_context(|| {
        format!(
            "Failed to load credentials from {}",
            config.server.passwd_file.display()
        )
    })?;
    if store.is_empty() {
        info!("Credential store is empty, nobody will be able to log in.");
    }
    let credentials: Arc<dyn CredentialStore> = Arc::new(store);
    let handlers = Arc::new(initialize_command_handlers());

    match network::start_server(Arc::new(config), Arc::clone(&credentials), handlers).await {
        Ok(_) => info!("Server stopped."),
        Err(e) => {
            error!("Server failed: {}", e);
            return Err(e);
        }
    }

    drop(credentials);
    info!("Credential store released.");
    Ok(())
}
