use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::reply::Reply;
use log::debug;

/// Verbs that are recognized but deliberately inert.
pub const UNSUPPORTED_COMMANDS: [FtpCommand; 10] = [
    FtpCommand::PASV,
    FtpCommand::EPSV,
    FtpCommand::EPRT,
    FtpCommand::RMD,
    FtpCommand::RNFR,
    FtpCommand::RNTO,
    FtpCommand::SITE,
    FtpCommand::STAT,
    FtpCommand::CDUP,
    FtpCommand::SIZE,
];

pub async fn handle_unsupported_command(command: FtpCommand) -> Result<Reply, std::io::Error> {
    debug!("{} is not implemented", command.as_str());
    Ok(Reply::NotImplemented)
}
