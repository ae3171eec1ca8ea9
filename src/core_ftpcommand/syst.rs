use crate::core_ftpcommand::reply::Reply;
use log::info;

/// Handles the SYST (System) FTP command.
///
/// The system type is fixed: clients only use it to pick a LIST parser.
pub async fn handle_syst_command() -> Result<Reply, std::io::Error> {
    info!("Responding to SYST command with system type.");
    Ok(Reply::SystemType)
}
