use crate::core_auth::credentials::CredentialStore;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::parser::parse_command;
use crate::core_ftpcommand::reply::Reply;
use crate::session::{LoginState, Session};
use log::{debug, info, warn};

/// Runs one line of the USER/PASS exchange against `session`.
///
/// The session reaches `LoginState::Authenticated` only through a `PASS`
/// whose password matches the stored credential of the pending user.
pub fn handle_login(line: &str, session: &mut Session, credentials: &dyn CredentialStore) -> Reply {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            debug!("Unparseable line during login: {}", e);
            return Reply::SyntaxError;
        }
    };
    let args = command.argument.as_str();

    match FtpCommand::from_verb(&command.verb) {
        Some(FtpCommand::USER) if args.is_empty() => {
            info!("Anonymous login denied");
            Reply::AnonymousDenied
        }
        Some(FtpCommand::USER) => {
            info!("Received USER command with username: {}", args);
            session.username = Some(args.to_string());
            session.login_state = LoginState::AwaitingPassword;
            Reply::NeedPassword
        }
        Some(FtpCommand::PASS) if args.is_empty() => Reply::SyntaxError,
        Some(FtpCommand::PASS) => authenticate(session, args, credentials),
        Some(FtpCommand::OPTS) if args.eq_ignore_ascii_case("UTF8 ON") => Reply::CommandOk,
        Some(FtpCommand::QUIT) => Reply::Goodbye,
        _ => Reply::SyntaxError,
    }
}

fn authenticate(session: &mut Session, password: &str, credentials: &dyn CredentialStore) -> Reply {
    let accepted = match session.username.as_deref() {
        Some(username) => credentials
            .lookup(username)
            .is_some_and(|credential| credential.matches(password)),
        None => false,
    };

    if accepted {
        session.login_state = LoginState::Authenticated;
        info!(
            "User {} logged in",
            session.username.as_deref().unwrap_or_default()
        );
        Reply::LoggedIn
    } else {
        warn!(
            "Authentication failed for user {:?}",
            session.username.as_deref().unwrap_or_default()
        );
        session.username = None;
        session.login_state = LoginState::AwaitingUsername;
        Reply::AuthFailureTryAgain
    }
}
