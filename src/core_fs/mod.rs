// Virtual working directory, per-user sandbox and directory listing
pub mod error;
pub mod listing;
pub mod sandbox;
pub mod virtual_path;

pub use error::PathError;
pub use listing::{DirEntryInfo, DirectoryLister, FsLister};
pub use sandbox::{change_directory, is_valid_username, strip_directory, UserSandbox};
pub use virtual_path::VirtualPath;
