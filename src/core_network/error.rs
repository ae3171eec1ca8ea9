use crate::core_ftpcommand::reply::Reply;
use std::net::SocketAddrV4;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortError {
    #[error("expected 6 comma-separated fields, got {0}")]
    FieldCount(usize),

    #[error("invalid byte value {0:?}")]
    InvalidByte(String),
}

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("No data address, PORT was not sent")]
    NoDataAddress,

    #[error("Failed to connect to {addr}: {source}")]
    Dial {
        addr: SocketAddrV4,
        #[source]
        source: std::io::Error,
    },

    #[error("Data connection stalled for {0:?}")]
    Timeout(Duration),

    #[error("Data connection error: {0}")]
    Data(#[source] std::io::Error),

    #[error("Local file error on {path:?}: {source}")]
    LocalFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Control connection error: {0}")]
    Control(#[source] std::io::Error),
}

impl TransferError {
    /// Reply reported to the client when a transfer does not complete.
    pub fn to_reply(&self) -> Reply {
        match self {
            TransferError::NoDataAddress | TransferError::Dial { .. } => {
                Reply::CantOpenDataConnection
            }
            TransferError::Timeout(_) | TransferError::Data(_) => Reply::TransferAborted,
            TransferError::LocalFile { .. } => Reply::FileUnavailable,
            TransferError::Control(_) => Reply::TransferAborted,
        }
    }
}
