use crate::core_ftpcommand::reply::Reply;
use log::info;

/// Handles the FEAT (Feature) FTP command.
///
/// This function responds with a list of supported features.
pub async fn handle_feat_command(_arg: String) -> Result<Reply, std::io::Error> {
    // Binary image type is the only one TYPE accepts.
    let features = vec!["TYPE I"];

    info!("Responding to FEAT command with supported features.");
    Ok(Reply::Features(
        features.into_iter().map(String::from).collect(),
    ))
}
