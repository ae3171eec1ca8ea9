use chrono::{DateTime, Local};
use log::warn;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: SystemTime,
}

/// Capability to enumerate a directory on disk.
pub trait DirectoryLister {
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>>;
}

/// Lists directories through `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, path: &Path) -> io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(
                        "Failed to get metadata for entry: {:?}, error: {:?}",
                        entry.path(),
                        e
                    );
                    continue;
                }
            };
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: metadata.is_dir(),
                size: metadata.len(),
                modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

/// Formats an entry the way `ls -l` does, as FTP clients expect from LIST.
pub fn format_list_line(entry: &DirEntryInfo) -> String {
    let file_type = if entry.is_dir { "d" } else { "-" };
    let modified: DateTime<Local> = entry.modified.into();
    format!(
        "{}rwxr-xr-x 1 owner group {} {} {}\r\n",
        file_type,
        entry.size,
        modified.format("%b %d %H:%M"),
        entry.name
    )
}

pub fn format_name_line(entry: &DirEntryInfo) -> String {
    format!("{}\r\n", entry.name)
}
