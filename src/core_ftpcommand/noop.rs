use crate::config::Config;
use crate::core_ftpcommand::reply::Reply;
use crate::helpers::ControlWriter;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_noop_command(
    _writer: ControlWriter,
    _config: Arc<Config>,
    _session: Arc<Mutex<Session>>,
    _arg: String,
) -> Result<Reply, std::io::Error> {
    Ok(Reply::CommandOk)
}
