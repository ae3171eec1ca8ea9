pub mod credentials;
pub mod error;
pub mod login;

pub use credentials::{CredentialStore, PasswdStore};
pub use login::handle_login;
