use crate::core_ftpcommand::reply::Reply;
use std::sync::Arc;

/// Handles the HELP FTP command with the verbs of the dispatch table.
pub async fn handle_help_command(verbs: Arc<Vec<String>>) -> Result<Reply, std::io::Error> {
    let lines = verbs.chunks(8).map(|chunk| chunk.join(" ")).collect();
    Ok(Reply::Help(lines))
}
