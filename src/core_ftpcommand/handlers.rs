use crate::config::Config;
use crate::core_ftpcommand::ftpcommand::FtpCommand;
use crate::core_ftpcommand::list::ListFormat;
use crate::core_ftpcommand::parser::parse_command;
use crate::core_ftpcommand::reply::Reply;
use crate::core_ftpcommand::unsupported::UNSUPPORTED_COMMANDS;
use crate::core_network::port;
use crate::helpers::ControlWriter;
use crate::session::Session;
use log::{debug, info};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;

pub type CommandHandler = Box<
    dyn Fn(
            ControlWriter,
            Arc<Config>,
            Arc<TokioMutex<Session>>,
            String, // Command argument
        ) -> Pin<Box<dyn Future<Output = Result<Reply, std::io::Error>> + Send>>
        + Send
        + Sync,
>;

pub type CommandHandlers = HashMap<FtpCommand, Arc<CommandHandler>>;

/// Builds the verb → handler table used after login.
pub fn initialize_command_handlers() -> CommandHandlers {
    let mut handlers: CommandHandlers = HashMap::new();

    handlers.insert(
        FtpCommand::NOOP,
        Arc::new(Box::new(|writer, config, session, arg| {
            Box::pin(crate::core_ftpcommand::noop::handle_noop_command(
                writer, config, session, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::SYST,
        Arc::new(Box::new(|_writer, _config, _session, _arg| {
            Box::pin(crate::core_ftpcommand::syst::handle_syst_command())
        })),
    );

    handlers.insert(
        FtpCommand::FEAT,
        Arc::new(Box::new(|_writer, _config, _session, arg| {
            Box::pin(crate::core_ftpcommand::feat::handle_feat_command(arg))
        })),
    );

    handlers.insert(
        FtpCommand::OPTS,
        Arc::new(Box::new(|_writer, _config, _session, arg| {
            Box::pin(crate::core_ftpcommand::opts::handle_opts_command(arg))
        })),
    );

    handlers.insert(
        FtpCommand::TYPE,
        Arc::new(Box::new(|writer, config, session, arg| {
            Box::pin(crate::core_ftpcommand::type_::handle_type_command(
                writer, config, session, arg,
            ))
        })),
    );

    for command in [FtpCommand::PWD, FtpCommand::XPWD] {
        handlers.insert(
            command,
            Arc::new(Box::new(|writer, config, session, arg| {
                Box::pin(crate::core_ftpcommand::pwd::handle_pwd_command(
                    writer, config, session, arg,
                ))
            })),
        );
    }

    for command in [FtpCommand::MKD, FtpCommand::XMKD] {
        handlers.insert(
            command,
            Arc::new(Box::new(|writer, config, session, arg| {
                Box::pin(crate::core_ftpcommand::mkd::handle_mkd_command(
                    writer, config, session, arg,
                ))
            })),
        );
    }

    handlers.insert(
        FtpCommand::CWD,
        Arc::new(Box::new(|writer, config, session, arg| {
            Box::pin(crate::core_ftpcommand::cwd::handle_cwd_command(
                writer, config, session, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::PORT,
        Arc::new(Box::new(|writer, config, session, arg| {
            Box::pin(port::handle_port_command(writer, config, session, arg))
        })),
    );

    handlers.insert(
        FtpCommand::STOR,
        Arc::new(Box::new(|writer, config, session, arg| {
            Box::pin(crate::core_ftpcommand::stor::handle_stor_command(
                writer, config, session, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::RETR,
        Arc::new(Box::new(|writer, config, session, arg| {
            Box::pin(crate::core_ftpcommand::retr::handle_retr_command(
                writer, config, session, arg,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::LIST,
        Arc::new(Box::new(|writer, config, session, _arg| {
            Box::pin(crate::core_ftpcommand::list::handle_list_command(
                writer,
                config,
                session,
                ListFormat::Long,
            ))
        })),
    );

    handlers.insert(
        FtpCommand::NLST,
        Arc::new(Box::new(|writer, config, session, _arg| {
            Box::pin(crate::core_ftpcommand::list::handle_list_command(
                writer,
                config,
                session,
                ListFormat::Names,
            ))
        })),
    );

    for command in UNSUPPORTED_COMMANDS {
        handlers.insert(
            command,
            Arc::new(Box::new(move |_writer, _config, _session, _arg| {
                Box::pin(crate::core_ftpcommand::unsupported::handle_unsupported_command(command))
            })),
        );
    }

    handlers.insert(
        FtpCommand::QUIT,
        Arc::new(Box::new(|_writer, _config, _session, _arg| {
            Box::pin(crate::core_ftpcommand::quit::handle_quit_command())
        })),
    );

    // HELP lists the table itself, so it goes in last.
    let mut verbs: Vec<FtpCommand> = handlers.keys().copied().collect();
    verbs.push(FtpCommand::HELP);
    verbs.sort();
    let verbs: Arc<Vec<String>> = Arc::new(verbs.iter().map(|c| c.as_str().to_string()).collect());
    handlers.insert(
        FtpCommand::HELP,
        Arc::new(Box::new(move |_writer, _config, _session, _arg| {
            Box::pin(crate::core_ftpcommand::help::handle_help_command(Arc::clone(
                &verbs,
            )))
        })),
    );

    handlers
}

/// Interprets one control line of an authenticated session.
///
/// Returns the reply to send; `Reply::closes_session` on it tells the caller
/// to end the session. An `Err` means the control connection itself failed.
pub async fn handle_command(
    line: &str,
    handlers: &CommandHandlers,
    writer: ControlWriter,
    config: Arc<Config>,
    session: Arc<TokioMutex<Session>>,
) -> Result<Reply, std::io::Error> {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            debug!("Rejected line: {}", e);
            return Ok(Reply::SyntaxError);
        }
    };

    let handler = FtpCommand::from_verb(&command.verb).and_then(|cmd| handlers.get(&cmd));
    match handler {
        Some(handler) => {
            info!("Received command: {} {}", command.verb, command.argument);
            handler(writer, config, session, command.argument).await
        }
        None => {
            info!("Unrecognized command: {}", command.verb);
            Ok(Reply::SyntaxError)
        }
    }
}
