use crate::config::Config;
use crate::core_fs::listing::{format_list_line, format_name_line};
use crate::core_fs::{DirEntryInfo, DirectoryLister, FsLister};
use crate::core_ftpcommand::reply::Reply;
use crate::core_network::data_channel::DataChannel;
use crate::core_network::error::TransferError;
use crate::helpers::{send_reply, send_response, ControlWriter};
use crate::session::Session;
use log::{error, info, warn};
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// `ls -l` style lines (LIST).
    Long,
    /// Bare names (NLST).
    Names,
}

/// Handles the LIST and NLST FTP commands for the current directory.
///
/// With a pending PORT address the listing goes over a data connection and
/// ends with `226`; without one the lines are written on the control
/// connection and followed by `200`.
pub async fn handle_list_command(
    writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    format: ListFormat,
) -> Result<Reply, std::io::Error> {
    let (dir_path, at_root, addr) = {
        let session = session.lock().await;
        match session.sandbox(&config.server.storage_root) {
            Ok(sandbox) => (
                sandbox.directory(&session.virtual_cwd),
                session.virtual_cwd.is_root(),
                session.pending_data_address,
            ),
            Err(e) => {
                error!("No storage for session: {}", e);
                return Ok(Reply::FileUnavailable);
            }
        }
    };
    info!("Listing directory: {:?}", dir_path);

    let entries = match FsLister.list(&dir_path) {
        Ok(entries) => entries,
        // A user who never uploaded anything has no home directory yet.
        Err(e) if e.kind() == ErrorKind::NotFound && at_root => Vec::new(),
        Err(e) => {
            error!("Error reading directory {:?}: {}", dir_path, e);
            return Ok(Reply::FileUnavailable);
        }
    };

    let listing = render(&entries, format);

    let Some(addr) = addr else {
        send_response(&writer, listing.as_bytes()).await?;
        return Ok(Reply::CommandOk);
    };

    match send_listing(addr, &listing, &writer, &config).await {
        Ok(()) => {
            info!("Directory listing sent successfully.");
            Ok(Reply::TransferComplete)
        }
        Err(TransferError::Control(e)) => Err(e),
        Err(e) => {
            warn!("Failed to send directory listing: {}", e);
            Ok(e.to_reply())
        }
    }
}

fn render(entries: &[DirEntryInfo], format: ListFormat) -> String {
    entries
        .iter()
        .map(|entry| match format {
            ListFormat::Long => format_list_line(entry),
            ListFormat::Names => format_name_line(entry),
        })
        .collect()
}

async fn send_listing(
    addr: std::net::SocketAddrV4,
    listing: &str,
    writer: &ControlWriter,
    config: &Config,
) -> Result<(), TransferError> {
    let mut channel = DataChannel::open(addr, config.server.data_timeout()).await?;
    send_reply(writer, &Reply::DataConnectionAlreadyOpen)
        .await
        .map_err(TransferError::Control)?;
    channel.write_all(listing.as_bytes()).await?;
    channel.finish().await
}
