#[allow(clippy::upper_case_acronyms)]
#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy, PartialOrd, Ord)]
pub enum FtpCommand {
    USER,
    PASS,
    OPTS,
    QUIT,
    NOOP,
    SYST,
    FEAT,
    HELP,
    TYPE,
    PWD,
    XPWD,
    MKD,
    XMKD,
    CWD,
    PORT,
    STOR,
    RETR,
    LIST,
    NLST,
    PASV,
    EPSV,
    EPRT,
    RMD,
    RNFR,
    RNTO,
    SITE,
    STAT,
    CDUP,
    SIZE,
}

impl FtpCommand {
    /// Looks up a verb. Matching is case-sensitive: `noop` is not `NOOP`.
    pub fn from_verb(verb: &str) -> Option<FtpCommand> {
        match verb {
            "USER" => Some(FtpCommand::USER),
            "PASS" => Some(FtpCommand::PASS),
            "OPTS" => Some(FtpCommand::OPTS),
            "QUIT" => Some(FtpCommand::QUIT),
            "NOOP" => Some(FtpCommand::NOOP),
            "SYST" => Some(FtpCommand::SYST),
            "FEAT" => Some(FtpCommand::FEAT),
            "HELP" => Some(FtpCommand::HELP),
            "TYPE" => Some(FtpCommand::TYPE),
            "PWD" => Some(FtpCommand::PWD),
            "XPWD" => Some(FtpCommand::XPWD),
            "MKD" => Some(FtpCommand::MKD),
            "XMKD" => Some(FtpCommand::XMKD),
            "CWD" => Some(FtpCommand::CWD),
            "PORT" => Some(FtpCommand::PORT),
            "STOR" => Some(FtpCommand::STOR),
            "RETR" => Some(FtpCommand::RETR),
            "LIST" => Some(FtpCommand::LIST),
            "NLST" => Some(FtpCommand::NLST),
            "PASV" => Some(FtpCommand::PASV),
            "EPSV" => Some(FtpCommand::EPSV),
            "EPRT" => Some(FtpCommand::EPRT),
            "RMD" => Some(FtpCommand::RMD),
            "RNFR" => Some(FtpCommand::RNFR),
            "RNTO" => Some(FtpCommand::RNTO),
            "SITE" => Some(FtpCommand::SITE),
            "STAT" => Some(FtpCommand::STAT),
            "CDUP" => Some(FtpCommand::CDUP),
            "SIZE" => Some(FtpCommand::SIZE),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FtpCommand::USER => "USER",
            FtpCommand::PASS => "PASS",
            FtpCommand::OPTS => "OPTS",
            FtpCommand::QUIT => "QUIT",
            FtpCommand::NOOP => "NOOP",
            FtpCommand::SYST => "SYST",
            FtpCommand::FEAT => "FEAT",
            FtpCommand::HELP => "HELP",
            FtpCommand::TYPE => "TYPE",
            FtpCommand::PWD => "PWD",
            FtpCommand::XPWD => "XPWD",
            FtpCommand::MKD => "MKD",
            FtpCommand::XMKD => "XMKD",
            FtpCommand::CWD => "CWD",
            FtpCommand::PORT => "PORT",
            FtpCommand::STOR => "STOR",
            FtpCommand::RETR => "RETR",
            FtpCommand::LIST => "LIST",
            FtpCommand::NLST => "NLST",
            FtpCommand::PASV => "PASV",
            FtpCommand::EPSV => "EPSV",
            FtpCommand::EPRT => "EPRT",
            FtpCommand::RMD => "RMD",
            FtpCommand::RNFR => "RNFR",
            FtpCommand::RNTO => "RNTO",
            FtpCommand::SITE => "SITE",
            FtpCommand::STAT => "STAT",
            FtpCommand::CDUP => "CDUP",
            FtpCommand::SIZE => "SIZE",
        }
    }
}
