use crate::config::Config;
use crate::core_auth::{handle_login, CredentialStore};
use crate::core_ftpcommand::handlers::{handle_command, CommandHandlers};
use crate::core_ftpcommand::reply::Reply;
use crate::helpers::{control_writer, read_command_line, send_reply};
use crate::session::Session;
use anyhow::{Context, Result};
use log::{error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Accepts control connections until Ctrl-C, one task per connection.
pub async fn start_server(
    config: Arc<Config>,
    credentials: Arc<dyn CredentialStore>,
    handlers: Arc<CommandHandlers>,
) -> Result<()> {
    let bind_addr = format!(
        "{}:{}",
        config.server.listen_address, config.server.listen_port
    );
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to listen on {}", bind_addr))?;
    info!("Server listening on {}", bind_addr);

    serve(listener, config, credentials, handlers, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to wait for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await
}

/// Accept loop on an already bound listener; returns when `shutdown`
/// completes.
pub async fn serve<F>(
    listener: TcpListener,
    config: Arc<Config>,
    credentials: Arc<dyn CredentialStore>,
    handlers: Arc<CommandHandlers>,
    shutdown: F,
) -> Result<()>
where
    F: std::future::Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, no longer accepting connections.");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (socket, addr) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };
                info!("New connection from {:?}", addr);

                let config = Arc::clone(&config);
                let credentials = Arc::clone(&credentials);
                let handlers = Arc::clone(&handlers);

                tokio::spawn(async move {
                    if let Err(e) = handle_connection(socket, config, credentials, handlers).await {
                        error!("Connection error: {:?}", e);
                    }
                    info!("Connection closed for {:?}", addr);
                });
            }
        }
    }
}

/// Runs one control session: greeting, login, then the command loop.
pub async fn handle_connection<S>(
    socket: S,
    config: Arc<Config>,
    credentials: Arc<dyn CredentialStore>,
    handlers: Arc<CommandHandlers>,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    let (reader, writer) = tokio::io::split(socket);
    let mut reader = BufReader::new(reader);
    let writer = control_writer(writer);
    let session = Arc::new(Mutex::new(Session::new()));

    send_reply(&writer, &Reply::ServiceReady).await?;

    // Login phase
    loop {
        let Some(line) = read_command_line(&mut reader).await? else {
            info!("Client disconnected before logging in");
            return Ok(());
        };
        let (reply, authenticated) = {
            let mut session = session.lock().await;
            let reply = handle_login(&line, &mut session, credentials.as_ref());
            (reply, session.is_authenticated())
        };
        send_reply(&writer, &reply).await?;
        if reply.closes_session() {
            return Ok(());
        }
        if authenticated {
            break;
        }
    }

    // Command phase
    loop {
        let Some(line) = read_command_line(&mut reader).await? else {
            info!("Client disconnected unexpectedly");
            break;
        };
        let reply = handle_command(
            &line,
            &handlers,
            Arc::clone(&writer),
            Arc::clone(&config),
            Arc::clone(&session),
        )
        .await
        .context("Control connection failed while handling a command")?;
        send_reply(&writer, &reply).await?;
        if reply.closes_session() {
            break;
        }
    }

    if let Err(e) = writer.lock().await.shutdown().await {
        warn!("Error shutting down control connection: {}", e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_auth::credentials::{Credential, PasswdStore};
    use crate::core_ftpcommand::handlers::initialize_command_handlers;
    use std::net::{Ipv4Addr, SocketAddr};
    use std::time::Duration;
    use tokio::io::{AsyncBufReadExt, AsyncReadExt, Lines};
    use tokio::net::tcp::OwnedReadHalf;
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    struct TestServer {
        addr: SocketAddr,
        storage: tempfile::TempDir,
        stop: Option<oneshot::Sender<()>>,
        task: tokio::task::JoinHandle<Result<()>>,
    }

    impl TestServer {
        async fn start() -> Self {
            let storage = tempfile::tempdir().unwrap();
            let mut config = Config::default();
            config.server.storage_root = storage.path().to_path_buf();
            config.server.data_timeout_secs = 5;

            let credentials: Arc<dyn CredentialStore> = Arc::new(
                PasswdStore::from_entries(vec![Credential::new("bob", "secret")]).unwrap(),
            );
            let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
            let addr = listener.local_addr().unwrap();
            let (stop, stopped) = oneshot::channel::<()>();

            let task = tokio::spawn(serve(
                listener,
                Arc::new(config),
                credentials,
                Arc::new(initialize_command_handlers()),
                async move {
                    let _ = stopped.await;
                },
            ));

            Self {
                addr,
                storage,
                stop: Some(stop),
                task,
            }
        }

        async fn stop(mut self) {
            if let Some(stop) = self.stop.take() {
                let _ = stop.send(());
            }
            self.task.await.unwrap().unwrap();
        }
    }

    struct Client {
        lines: Lines<BufReader<OwnedReadHalf>>,
        writer: tokio::net::tcp::OwnedWriteHalf,
    }

    impl Client {
        async fn connect(addr: SocketAddr) -> Self {
            let stream = TcpStream::connect(addr).await.unwrap();
            let (reader, writer) = stream.into_split();
            Self {
                lines: BufReader::new(reader).lines(),
                writer,
            }
        }

        async fn line(&mut self) -> String {
            tokio::time::timeout(Duration::from_secs(5), self.lines.next_line())
                .await
                .expect("reply timed out")
                .unwrap()
                .expect("connection closed")
        }

        async fn send(&mut self, command: &str) {
            self.writer
                .write_all(format!("{}\r\n", command).as_bytes())
                .await
                .unwrap();
        }

        async fn command(&mut self, command: &str) -> String {
            self.send(command).await;
            self.line().await
        }

        async fn login(&mut self) {
            assert_eq!(self.line().await, "220 FTP Server Ready");
            assert_eq!(self.command("USER bob").await, "331 Username OK Need Pass");
            assert_eq!(self.command("PASS secret").await, "230 User Logged In Proceed");
        }
    }

    fn port_argument(addr: SocketAddr) -> String {
        let port = addr.port();
        format!("127,0,0,1,{},{}", port / 256, port % 256)
    }

    #[tokio::test]
    async fn test_store_end_to_end() {
        let server = TestServer::start().await;
        let mut client = Client::connect(server.addr).await;
        client.login().await;
        assert_eq!(client.command("TYPE I").await, "200 Type set ok");

        let data_listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let data_addr = data_listener.local_addr().unwrap();
        assert_eq!(
            client
                .command(&format!("PORT {}", port_argument(data_addr)))
                .await,
            "200 PORT ok"
        );

        client.send("STOR file.txt").await;
        let (mut data, _) = data_listener.accept().await.unwrap();
        data.write_all(b"uploaded contents").await.unwrap();
        drop(data);

        assert_eq!(
            client.line().await,
            "125 Data connection already open, starting transfer"
        );
        assert_eq!(client.line().await, "226 Data transfer complete");

        let stored = server.storage.path().join("bob").join("file.txt");
        assert_eq!(std::fs::read(stored).unwrap(), b"uploaded contents");

        assert_eq!(client.command("QUIT").await, "221 Goodbye!");
        server.stop().await;
    }

    #[tokio::test]
    async fn test_retrieve_end_to_end() {
        let server = TestServer::start().await;
        let home = server.storage.path().join("bob").join("docs");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::write(home.join("report.txt"), b"quarterly numbers").unwrap();

        let mut client = Client::connect(server.addr).await;
        client.login().await;
        assert_eq!(client.command("CWD docs").await, "200 Command ok");
        assert_eq!(client.command("PWD").await, "257 \"/docs\"");

        let data_listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let data_addr = data_listener.local_addr().unwrap();
        client
            .command(&format!("PORT {}", port_argument(data_addr)))
            .await;

        client.send("RETR ../report.txt").await;
        let (mut data, _) = data_listener.accept().await.unwrap();
        let mut received = Vec::new();
        data.read_to_end(&mut received).await.unwrap();
        assert_eq!(received, b"quarterly numbers");

        assert_eq!(
            client.line().await,
            "125 Data connection already open, starting transfer"
        );
        assert_eq!(client.line().await, "200 Command ok");

        // LIST goes over the data channel once PORT has been sent.
        client.send("NLST").await;
        let (mut data, _) = data_listener.accept().await.unwrap();
        let mut listing = String::new();
        data.read_to_string(&mut listing).await.unwrap();
        assert_eq!(listing, "report.txt\r\n");
        assert_eq!(
            client.line().await,
            "125 Data connection already open, starting transfer"
        );
        assert_eq!(client.line().await, "226 Data transfer complete");

        client.command("QUIT").await;
        server.stop().await;
    }

    #[tokio::test]
    async fn test_failed_login_then_retry() {
        let server = TestServer::start().await;
        let mut client = Client::connect(server.addr).await;
        assert_eq!(client.line().await, "220 FTP Server Ready");
        assert_eq!(client.command("NOOP").await, "500 Syntax Error");
        assert_eq!(client.command("USER").await, "550 Anon User Denied");
        client.command("USER bob").await;
        assert_eq!(
            client.command("PASS wrong").await,
            "530 Please login with USER and PASS."
        );
        client.command("USER bob").await;
        assert_eq!(client.command("PASS secret").await, "230 User Logged In Proceed");
        assert_eq!(client.command("NOOP").await, "200 Command ok");
        server.stop().await;
    }

    #[tokio::test]
    async fn test_quit_before_login_closes_connection() {
        let server = TestServer::start().await;
        let mut client = Client::connect(server.addr).await;
        client.line().await;
        assert_eq!(client.command("QUIT").await, "221 Goodbye!");
        assert!(client.lines.next_line().await.unwrap().is_none());
        server.stop().await;
    }

    #[tokio::test]
    async fn test_idle_session_does_not_block_others() {
        let server = TestServer::start().await;

        // First client connects and then sits idle mid-login.
        let mut idle = Client::connect(server.addr).await;
        idle.line().await;
        idle.send("USER bob").await;

        let mut active = Client::connect(server.addr).await;
        active.login().await;
        assert_eq!(active.command("NOOP").await, "200 Command ok");

        assert_eq!(idle.line().await, "331 Username OK Need Pass");
        server.stop().await;
    }

    #[tokio::test]
    async fn test_non_utf8_line_keeps_session_open() {
        let server = TestServer::start().await;
        let mut client = Client::connect(server.addr).await;
        client.login().await;

        client.writer.write_all(b"CWD caf\xe9\r\n").await.unwrap();
        assert_eq!(client.line().await, "500 Syntax Error");
        assert_eq!(client.command("NOOP").await, "200 Command ok");
        server.stop().await;
    }

    #[tokio::test]
    async fn test_store_with_unreachable_data_address() {
        let server = TestServer::start().await;
        let mut client = Client::connect(server.addr).await;
        client.login().await;

        let data_listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let data_addr = data_listener.local_addr().unwrap();
        drop(data_listener);
        client
            .command(&format!("PORT {}", port_argument(data_addr)))
            .await;

        assert_eq!(
            client.command("STOR file.txt").await,
            "425 Can't open data connection"
        );
        // The session survives the failed transfer.
        assert_eq!(client.command("NOOP").await, "200 Command ok");
        server.stop().await;
    }
}
