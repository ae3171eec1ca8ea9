use crate::constants::USERNAME_REGEX;
use crate::core_fs::error::PathError;
use crate::core_fs::listing::DirectoryLister;
use crate::core_fs::virtual_path::{is_plain_name, VirtualPath};
use log::{debug, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(USERNAME_REGEX).expect("USERNAME_REGEX is a valid pattern"))
}

/// True when `username` can name a storage directory.
pub fn is_valid_username(username: &str) -> bool {
    username_regex().is_match(username)
}

/// Keeps only the base name of a client-supplied file argument.
///
/// Both `/` and `\` count as separators, so `../../etc/passwd` and
/// `..\..\boot.ini` keep only `passwd` and `boot.ini`.
pub fn strip_directory(arg: &str) -> &str {
    arg.rsplit(['/', '\\']).next().unwrap_or(arg)
}

/// A user's storage subtree: `storage_root/username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSandbox {
    home: PathBuf,
}

impl UserSandbox {
    pub fn new(storage_root: &Path, username: &str) -> Result<Self, PathError> {
        if !is_valid_username(username) {
            return Err(PathError::InvalidUsername(username.to_string()));
        }
        Ok(Self {
            home: storage_root.join(username),
        })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Filesystem directory backing a virtual path.
    pub fn directory(&self, cwd: &VirtualPath) -> PathBuf {
        cwd.segments()
            .fold(self.home.clone(), |path, segment| path.join(segment))
    }

    /// Maps a STOR/RETR/MKD argument to `home/<cwd>/<basename>`.
    pub fn resolve(&self, cwd: &VirtualPath, arg: &str) -> Result<PathBuf, PathError> {
        let name = strip_directory(arg.trim());
        if !is_plain_name(name) {
            warn!("Rejected file name {:?} (from argument {:?})", name, arg);
            return Err(PathError::InvalidName(arg.to_string()));
        }

        let path = self.directory(cwd).join(name);
        if !path.starts_with(self.home()) {
            return Err(PathError::OutsideSandbox(path));
        }
        debug!("Resolved {:?} in {} to {:?}", arg, cwd, path);
        Ok(path)
    }
}

/// Applies a CWD argument to the virtual working directory.
///
/// `..` climbs one level (never above `/`); anything else must name an
/// existing subdirectory of the current directory.
pub fn change_directory<L>(
    sandbox: &UserSandbox,
    cwd: &VirtualPath,
    arg: &str,
    lister: &L,
) -> Result<VirtualPath, PathError>
where
    L: DirectoryLister + ?Sized,
{
    if arg == ".." {
        return cwd.parent().ok_or(PathError::AboveRoot);
    }

    let dir = sandbox.directory(cwd);
    let entries = lister.list(&dir).map_err(|source| PathError::Listing {
        path: dir.clone(),
        source,
    })?;

    let found = entries.iter().any(|entry| entry.is_dir && entry.name == arg);
    match cwd.child(arg) {
        Some(next) if found => Ok(next),
        _ => Err(PathError::NoSuchDirectory(arg.to_string())),
    }
}
