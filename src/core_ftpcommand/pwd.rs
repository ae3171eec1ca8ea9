// src/core_ftpcommand/pwd.rs
use crate::config::Config;
use crate::core_ftpcommand::reply::Reply;
use crate::helpers::ControlWriter;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_pwd_command(
    _writer: ControlWriter,
    _config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    _arg: String,
) -> Result<Reply, std::io::Error> {
    let session = session.lock().await;
    Ok(Reply::WorkingDirectory(session.virtual_cwd.to_string()))
}
