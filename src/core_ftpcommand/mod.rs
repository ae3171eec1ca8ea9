// Here's the list of the FTP commands implemented
pub mod cwd;
pub mod feat;
pub mod handlers;
pub mod help;
pub mod list;
pub mod mkd;
pub mod noop;
pub mod opts;
pub mod pwd;
pub mod quit;
pub mod retr;
pub mod stor;
pub mod syst;
pub mod type_;
pub mod unsupported;

// Command vocabulary, parsing and replies
pub mod ftpcommand;
pub mod parser;
pub mod reply;
