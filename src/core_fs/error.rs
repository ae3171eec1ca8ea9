use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Invalid username for storage: {0:?}")]
    InvalidUsername(String),

    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    #[error("Already at the root directory")]
    AboveRoot,

    #[error("No such directory: {0}")]
    NoSuchDirectory(String),

    #[error("Path is outside of the allowed area: {0:?}")]
    OutsideSandbox(PathBuf),

    #[error("Failed to list directory {path:?}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
