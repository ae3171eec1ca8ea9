use crate::core_ftpcommand::reply::Reply;
use log::info;

/// Handles the QUIT FTP command.
///
/// The returned reply closes the session once it has been sent.
pub async fn handle_quit_command() -> Result<Reply, std::io::Error> {
    info!("Received QUIT command. Closing connection.");
    Ok(Reply::Goodbye)
}
