use crate::config::Config;
use crate::core_ftpcommand::reply::Reply;
use crate::helpers::ControlWriter;
use crate::session::Session;
use log::{error, info};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Handles the MKD / XMKD (Make Directory) FTP commands.
///
/// The directory is created under the user's current directory; only the
/// base name of the argument is used. The reply is `200` whether or not the
/// directory could be created; failures are only logged.
pub async fn handle_mkd_command(
    _writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<Reply, std::io::Error> {
    info!("Received MKD command with argument: {}", arg);

    let dir_path = {
        let session = session.lock().await;
        session
            .sandbox(&config.server.storage_root)
            .and_then(|sandbox| sandbox.resolve(&session.virtual_cwd, &arg))
    };

    match dir_path {
        Ok(dir_path) => match fs::create_dir_all(&dir_path).await {
            Ok(_) => info!("Directory created successfully: {:?}", dir_path),
            Err(e) => error!("Failed to create directory: {:?}, error: {}", dir_path, e),
        },
        Err(e) => error!("Refused to create directory {:?}: {}", arg, e),
    }

    Ok(Reply::CommandOk)
}
