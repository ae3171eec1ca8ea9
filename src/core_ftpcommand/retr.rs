use crate::config::Config;
use crate::core_ftpcommand::reply::Reply;
use crate::core_network::data_channel::{transfer, Direction, TransferOptions};
use crate::core_network::error::TransferError;
use crate::helpers::ControlWriter;
use crate::session::Session;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the RETR (Retrieve) FTP command.
///
/// Streams `<home>/<cwd>/<basename of arg>` to the address from the last
/// PORT command.
pub async fn handle_retr_command(
    writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<Reply, std::io::Error> {
    let (file_path, addr) = {
        let session = session.lock().await;
        let file_path = match session
            .sandbox(&config.server.storage_root)
            .and_then(|sandbox| sandbox.resolve(&session.virtual_cwd, &arg))
        {
            Ok(path) => path,
            Err(e) => {
                warn!("RETR rejected for {:?}: {}", arg, e);
                return Ok(Reply::ParameterSyntaxError);
            }
        };
        (file_path, session.pending_data_address)
    };
    info!("Sending file: {:?}", file_path);

    let Some(addr) = addr else {
        warn!("RETR without a PORT address");
        return Ok(TransferError::NoDataAddress.to_reply());
    };

    let options = TransferOptions::for_direction(&config, Direction::Send);
    match transfer(Direction::Send, addr, &file_path, &writer, options).await {
        Ok(_) => {
            info!("File transfer completed successfully: {:?}", file_path);
            Ok(Reply::CommandOk)
        }
        Err(TransferError::Control(e)) => Err(e),
        Err(e) => {
            error!("RETR of {:?} failed: {}", file_path, e);
            Ok(e.to_reply())
        }
    }
}
