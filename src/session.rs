use crate::core_fs::{PathError, UserSandbox, VirtualPath};
use std::net::SocketAddrV4;
use std::path::Path;

/// Where a session stands in the USER/PASS exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginState {
    #[default]
    AwaitingUsername,
    AwaitingPassword,
    Authenticated,
}

/// Per-control-connection state, owned by the connection's task.
#[derive(Debug, Default)]
pub struct Session {
    pub username: Option<String>, // Username for the session
    pub login_state: LoginState,
    pub virtual_cwd: VirtualPath,
    pub pending_data_address: Option<SocketAddrV4>, // Last address sent with PORT
    pub pending_filename: Option<String>,           // Base name of the last STOR
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.login_state == LoginState::Authenticated
    }

    /// The storage subtree of the logged-in user.
    pub fn sandbox(&self, storage_root: &Path) -> Result<UserSandbox, PathError> {
        let username = self.username.as_deref().unwrap_or_default();
        UserSandbox::new(storage_root, username)
    }
}
