// src/constants.rs

pub const USERNAME_REGEX: &str = r"^[a-zA-Z0-9]{1,32}$";

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 2121;
pub const DEFAULT_STORAGE_ROOT: &str = "uploads";
pub const DEFAULT_PASSWD_FILE: &str = "etc/passwd";

/// Read deadline on the data channel, in seconds.
pub const DEFAULT_DATA_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_UPLOAD_BUFFER_SIZE: usize = 1024;
pub const DEFAULT_DOWNLOAD_BUFFER_SIZE: usize = 1024;

/// Shortest line that can carry a verb.
pub const MIN_COMMAND_LENGTH: usize = 3;

pub const SYSTEM_TYPE: &str = "UNIX Type: L8";
