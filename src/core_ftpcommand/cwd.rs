use crate::config::Config;
use crate::core_fs::{change_directory, FsLister};
use crate::core_ftpcommand::reply::Reply;
use crate::helpers::ControlWriter;
use crate::session::Session;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Handles the CWD FTP command: `..` or the name of a subdirectory of the
/// current directory.
pub async fn handle_cwd_command(
    _writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<Reply, std::io::Error> {
    let mut session = session.lock().await;
    info!("Received CWD command with argument: {}", arg);

    let result = session
        .sandbox(&config.server.storage_root)
        .and_then(|sandbox| change_directory(&sandbox, &session.virtual_cwd, &arg, &FsLister));

    match result {
        Ok(new_dir) => {
            info!("Directory successfully changed to: {}", new_dir);
            session.virtual_cwd = new_dir;
            Ok(Reply::CommandOk)
        }
        Err(e) => {
            warn!("Failed to change directory to {:?}: {}", arg, e);
            Ok(Reply::SyntaxError)
        }
    }
}
