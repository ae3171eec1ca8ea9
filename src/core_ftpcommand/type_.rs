use crate::config::Config;
use crate::core_ftpcommand::reply::Reply;
use crate::helpers::ControlWriter;
use crate::session::Session;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the TYPE FTP command.
///
/// Only binary image type (`TYPE I`) is acknowledged; every transfer is raw
/// bytes.
pub async fn handle_type_command(
    _writer: ControlWriter,
    _config: Arc<Config>,
    _session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<Reply, std::io::Error> {
    if arg == "I" {
        info!("Transfer type set to I");
        Ok(Reply::TypeSetOk)
    } else {
        warn!("Unsupported transfer type: {:?}", arg);
        Ok(Reply::SyntaxError)
    }
}
