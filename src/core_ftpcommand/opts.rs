use crate::core_ftpcommand::reply::Reply;

/// Handles the OPTS FTP command. Only `UTF8 ON` is understood; paths are
/// always UTF-8 here.
pub async fn handle_opts_command(arg: String) -> Result<Reply, std::io::Error> {
    if arg.eq_ignore_ascii_case("UTF8 ON") {
        Ok(Reply::CommandOk)
    } else {
        Ok(Reply::ParameterSyntaxError)
    }
}
