use crate::constants::SYSTEM_TYPE;
use std::fmt;

/// A reply sent on the control channel.
///
/// Every variant maps to one FTP status code and a fixed text; `Display`
/// renders the wire form including the trailing CRLF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    DataConnectionAlreadyOpen,
    CommandOk,
    TypeSetOk,
    PortOk,
    Features(Vec<String>),
    Help(Vec<String>),
    SystemType,
    ServiceReady,
    Goodbye,
    TransferComplete,
    LoggedIn,
    WorkingDirectory(String),
    NeedPassword,
    CantOpenDataConnection,
    TransferAborted,
    SyntaxError,
    ParameterSyntaxError,
    NotImplemented,
    AuthFailureTryAgain,
    AnonymousDenied,
    FileUnavailable,
}

impl Reply {
    pub fn code(&self) -> u16 {
        match self {
            Reply::DataConnectionAlreadyOpen => 125,
            Reply::CommandOk | Reply::TypeSetOk | Reply::PortOk => 200,
            Reply::Features(_) => 211,
            Reply::Help(_) => 214,
            Reply::SystemType => 215,
            Reply::ServiceReady => 220,
            Reply::Goodbye => 221,
            Reply::TransferComplete => 226,
            Reply::LoggedIn => 230,
            Reply::WorkingDirectory(_) => 257,
            Reply::NeedPassword => 331,
            Reply::CantOpenDataConnection => 425,
            Reply::TransferAborted => 426,
            Reply::SyntaxError => 500,
            Reply::ParameterSyntaxError => 501,
            Reply::NotImplemented => 502,
            Reply::AuthFailureTryAgain => 530,
            Reply::AnonymousDenied | Reply::FileUnavailable => 550,
        }
    }

    /// True for the reply that ends the control session.
    pub fn closes_session(&self) -> bool {
        matches!(self, Reply::Goodbye)
    }

    fn text(&self) -> String {
        match self {
            Reply::DataConnectionAlreadyOpen => {
                "Data connection already open, starting transfer".to_string()
            }
            Reply::CommandOk => "Command ok".to_string(),
            Reply::TypeSetOk => "Type set ok".to_string(),
            Reply::PortOk => "PORT ok".to_string(),
            Reply::Features(_) => "End".to_string(),
            Reply::Help(_) => "Help OK".to_string(),
            Reply::SystemType => SYSTEM_TYPE.to_string(),
            Reply::ServiceReady => "FTP Server Ready".to_string(),
            Reply::Goodbye => "Goodbye!".to_string(),
            Reply::TransferComplete => "Data transfer complete".to_string(),
            Reply::LoggedIn => "User Logged In Proceed".to_string(),
            Reply::WorkingDirectory(dir) => format!("\"{}\"", dir.replace('"', "\"\"")),
            Reply::NeedPassword => "Username OK Need Pass".to_string(),
            Reply::CantOpenDataConnection => "Can't open data connection".to_string(),
            Reply::TransferAborted => "Connection closed; transfer aborted".to_string(),
            Reply::SyntaxError => "Syntax Error".to_string(),
            Reply::ParameterSyntaxError => {
                "Syntax error in parameters or arguments".to_string()
            }
            Reply::NotImplemented => "Command not implemented".to_string(),
            Reply::AuthFailureTryAgain => "Please login with USER and PASS.".to_string(),
            Reply::AnonymousDenied => "Anon User Denied".to_string(),
            Reply::FileUnavailable => "Requested action not taken. File unavailable".to_string(),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code();
        match self {
            Reply::Features(lines) => {
                write!(f, "{}-Features:\r\n", code)?;
                for line in lines {
                    write!(f, " {}\r\n", line)?;
                }
            }
            Reply::Help(lines) => {
                write!(f, "{}-The following commands are recognized:\r\n", code)?;
                for line in lines {
                    write!(f, " {}\r\n", line)?;
                }
            }
            _ => {}
        }
        write!(f, "{} {}\r\n", code, self.text())
    }
}
