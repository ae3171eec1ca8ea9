use crate::core_ftpcommand::reply::Reply;
use log::debug;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Write side of a control connection, shared between the session loop and
/// the command handlers.
pub type ControlWriter = Arc<Mutex<Box<dyn AsyncWrite + Send + Unpin>>>;

pub fn control_writer<W>(writer: W) -> ControlWriter
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    Arc::new(Mutex::new(Box::new(writer)))
}

/// Sends raw bytes to the client.
pub async fn send_response(writer: &ControlWriter, message: &[u8]) -> Result<(), std::io::Error> {
    let mut writer = writer.lock().await;
    writer.write_all(message).await?;
    writer.flush().await?;
    Ok(())
}

/// Sends a reply to the client.
pub async fn send_reply(writer: &ControlWriter, reply: &Reply) -> Result<(), std::io::Error> {
    let message = reply.to_string();
    debug!("send: {}", message.trim_end());
    send_response(writer, message.as_bytes()).await
}

/// Reads one control line with its CR/LF removed; `None` once the peer has
/// closed the connection.
///
/// Bytes that are not UTF-8 are replaced rather than rejected, so the line
/// still reaches the parser and gets a reply.
pub async fn read_command_line<R>(reader: &mut R) -> Result<Option<String>, std::io::Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut buffer = Vec::new();
    let n = reader.read_until(b'\n', &mut buffer).await?;
    if n == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buffer)
        .trim_end_matches(['\r', '\n'])
        .to_string();
    debug!("received: {}", line);
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, BufReader};

    #[tokio::test]
    async fn test_read_command_line_strips_crlf() {
        let mut reader = BufReader::new(&b"USER bob\r\nNOOP\n"[..]);
        assert_eq!(
            read_command_line(&mut reader).await.unwrap().as_deref(),
            Some("USER bob")
        );
        assert_eq!(
            read_command_line(&mut reader).await.unwrap().as_deref(),
            Some("NOOP")
        );
        assert_eq!(read_command_line(&mut reader).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_command_line_tolerates_latin1() {
        let mut reader = BufReader::new(&b"CWD caf\xe9\r\nNOOP\r\n"[..]);
        assert_eq!(
            read_command_line(&mut reader).await.unwrap().as_deref(),
            Some("CWD caf\u{FFFD}")
        );
        assert_eq!(
            read_command_line(&mut reader).await.unwrap().as_deref(),
            Some("NOOP")
        );
    }

    #[tokio::test]
    async fn test_send_reply_writes_wire_format() {
        let (client, server) = tokio::io::duplex(1024);
        let writer = control_writer(server);
        send_reply(&writer, &Reply::CommandOk).await.unwrap();
        drop(writer);

        let mut received = String::new();
        let mut client = client;
        client.read_to_string(&mut received).await.unwrap();
        assert_eq!(received, "200 Command ok\r\n");
    }
}
