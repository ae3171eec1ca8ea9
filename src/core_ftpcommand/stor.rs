use crate::config::Config;
use crate::core_fs::strip_directory;
use crate::core_ftpcommand::reply::Reply;
use crate::core_network::data_channel::{transfer, Direction, TransferOptions};
use crate::core_network::error::TransferError;
use crate::helpers::ControlWriter;
use crate::session::Session;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the STOR (Store File) FTP command.
///
/// Dials the address from the last PORT command and writes what the client
/// sends into `<home>/<cwd>/<basename of arg>`. Only the base name of the
/// argument is honored, so `../../etc/passwd` is stored as `passwd`.
pub async fn handle_stor_command(
    writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<Reply, std::io::Error> {
    let (file_path, addr) = {
        let mut session = session.lock().await;
        let file_path = match session
            .sandbox(&config.server.storage_root)
            .and_then(|sandbox| sandbox.resolve(&session.virtual_cwd, &arg))
        {
            Ok(path) => path,
            Err(e) => {
                warn!("STOR rejected for {:?}: {}", arg, e);
                return Ok(Reply::ParameterSyntaxError);
            }
        };
        session.pending_filename = Some(strip_directory(&arg).to_string());
        (file_path, session.pending_data_address)
    };
    info!("Received STOR command, storing into {:?}", file_path);

    let Some(addr) = addr else {
        warn!("STOR without a PORT address");
        return Ok(TransferError::NoDataAddress.to_reply());
    };

    let options = TransferOptions::for_direction(&config, Direction::Receive);
    match transfer(Direction::Receive, addr, &file_path, &writer, options).await {
        Ok(_) => {
            info!("File stored successfully: {:?}", file_path);
            Ok(Reply::TransferComplete)
        }
        Err(TransferError::Control(e)) => Err(e),
        Err(e) => {
            error!("STOR of {:?} failed: {}", file_path, e);
            Ok(e.to_reply())
        }
    }
}
