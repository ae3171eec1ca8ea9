use crate::config::Config;
use crate::core_ftpcommand::reply::Reply;
use crate::core_network::error::PortError;
use crate::helpers::ControlWriter;
use crate::session::Session;
use log::{info, warn};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Parses a PORT argument `h1,h2,h3,h4,p1,p2` into `h1.h2.h3.h4:(p1*256+p2)`.
pub fn parse_port_args(arg: &str) -> Result<SocketAddrV4, PortError> {
    let parts: Vec<&str> = arg.split(',').map(str::trim).collect();
    if parts.len() != 6 {
        return Err(PortError::FieldCount(parts.len()));
    }

    let mut bytes = [0u8; 6];
    for (byte, part) in bytes.iter_mut().zip(&parts) {
        *byte = part
            .parse::<u8>()
            .map_err(|_| PortError::InvalidByte(part.to_string()))?;
    }

    let ip = Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]);
    let port = u16::from(bytes[4]) * 256 + u16::from(bytes[5]);
    Ok(SocketAddrV4::new(ip, port))
}

/// Handles the PORT (Active Mode) FTP command.
///
/// Only records the address; the data connection is dialed by the command
/// that moves data.
pub async fn handle_port_command(
    _writer: ControlWriter,
    _config: Arc<Config>,
    session: Arc<Mutex<Session>>,
    arg: String,
) -> Result<Reply, std::io::Error> {
    match parse_port_args(&arg) {
        Ok(addr) => {
            info!("Received PORT command with address: {}", addr);
            session.lock().await.pending_data_address = Some(addr);
            Ok(Reply::PortOk)
        }
        Err(e) => {
            warn!("Invalid PORT argument {:?}: {}", arg, e);
            Ok(Reply::ParameterSyntaxError)
        }
    }
}
