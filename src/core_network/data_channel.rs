use crate::config::Config;
use crate::core_ftpcommand::reply::Reply;
use crate::core_network::error::TransferError;
use crate::helpers::{send_reply, ControlWriter};
use log::{debug, error, info};
use std::net::SocketAddrV4;
use std::path::Path;
use std::time::Duration;
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Which way bytes flow over the data channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Server to client (RETR).
    Send,
    /// Client to server (STOR).
    Receive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferOptions {
    /// Bound on every single read from (or write to) the data channel.
    pub read_timeout: Duration,
    pub buffer_size: usize,
}

impl TransferOptions {
    pub fn for_direction(config: &Config, direction: Direction) -> Self {
        let buffer_size = match direction {
            Direction::Send => config.server.download_buffer_size,
            Direction::Receive => config.server.upload_buffer_size,
        };
        Self {
            read_timeout: config.server.data_timeout(),
            buffer_size: buffer_size.max(1),
        }
    }
}

fn local_error(path: &Path, source: std::io::Error) -> TransferError {
    TransferError::LocalFile {
        path: path.to_path_buf(),
        source,
    }
}

/// An outbound data connection, dialed to the address the client sent with
/// PORT. Closed when dropped.
pub struct DataChannel {
    stream: TcpStream,
    read_timeout: Duration,
}

impl DataChannel {
    pub async fn open(addr: SocketAddrV4, read_timeout: Duration) -> Result<Self, TransferError> {
        debug!("Connecting data channel to {}", addr);
        let stream = match timeout(read_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(TransferError::Dial { addr, source }),
            Err(_) => {
                return Err(TransferError::Dial {
                    addr,
                    source: std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        "connect timed out",
                    ),
                })
            }
        };
        Ok(Self {
            stream,
            read_timeout,
        })
    }

    async fn read_chunk(&mut self, buffer: &mut [u8]) -> Result<usize, TransferError> {
        match timeout(self.read_timeout, self.stream.read(buffer)).await {
            Ok(result) => result.map_err(TransferError::Data),
            Err(_) => Err(TransferError::Timeout(self.read_timeout)),
        }
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransferError> {
        match timeout(self.read_timeout, self.stream.write_all(bytes)).await {
            Ok(result) => result.map_err(TransferError::Data),
            Err(_) => Err(TransferError::Timeout(self.read_timeout)),
        }
    }

    /// Signals end of data to the client.
    pub async fn finish(mut self) -> Result<(), TransferError> {
        self.stream.shutdown().await.map_err(TransferError::Data)
    }

    /// Copies the incoming stream into `file` until the client closes it.
    async fn receive_into(
        &mut self,
        file: &mut File,
        path: &Path,
        buffer_size: usize,
    ) -> Result<u64, TransferError> {
        let mut buffer = vec![0; buffer_size];
        let mut total = 0u64;
        loop {
            let n = self.read_chunk(&mut buffer).await?;
            if n == 0 {
                break;
            }
            file.write_all(&buffer[..n])
                .await
                .map_err(|source| local_error(path, source))?;
            total += n as u64;
        }
        file.flush()
            .await
            .map_err(|source| local_error(path, source))?;
        Ok(total)
    }

    async fn send_from(
        &mut self,
        file: &mut File,
        path: &Path,
        buffer_size: usize,
    ) -> Result<u64, TransferError> {
        let mut buffer = vec![0; buffer_size];
        let mut total = 0u64;
        loop {
            let n = file
                .read(&mut buffer)
                .await
                .map_err(|source| local_error(path, source))?;
            if n == 0 {
                break;
            }
            self.write_all(&buffer[..n]).await?;
            total += n as u64;
        }
        Ok(total)
    }
}

/// Moves one file over a freshly dialed data channel.
///
/// Announces the transfer on the control channel once the data channel is
/// up. A failure part way through leaves whatever was already written.
pub async fn transfer(
    direction: Direction,
    addr: SocketAddrV4,
    local_path: &Path,
    control: &ControlWriter,
    options: TransferOptions,
) -> Result<u64, TransferError> {
    let mut channel = DataChannel::open(addr, options.read_timeout).await?;

    send_reply(control, &Reply::DataConnectionAlreadyOpen)
        .await
        .map_err(TransferError::Control)?;

    let bytes = match direction {
        Direction::Receive => {
            if let Some(parent) = local_path.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| local_error(parent, source))?;
            }
            let mut file = File::create(local_path)
                .await
                .map_err(|source| local_error(local_path, source))?;
            channel
                .receive_into(&mut file, local_path, options.buffer_size)
                .await?
        }
        Direction::Send => {
            let mut file = File::open(local_path)
                .await
                .map_err(|source| local_error(local_path, source))?;
            let bytes = channel
                .send_from(&mut file, local_path, options.buffer_size)
                .await?;
            if let Err(e) = channel.finish().await {
                error!("Error shutting down data stream: {}", e);
            }
            bytes
        }
    };

    info!(
        "{:?} of {:?} finished, {} bytes via {}",
        direction, local_path, bytes, addr
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::control_writer;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    fn options() -> TransferOptions {
        TransferOptions {
            read_timeout: Duration::from_secs(5),
            buffer_size: 7,
        }
    }

    async fn local_listener() -> (TcpListener, SocketAddrV4) {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, SocketAddrV4::new(Ipv4Addr::LOCALHOST, port))
    }

    #[tokio::test]
    async fn test_receive_writes_file_and_creates_directories() {
        let storage = tempfile::tempdir().unwrap();
        let target = storage.path().join("bob").join("sub").join("file.txt");
        let (listener, addr) = local_listener().await;

        let client = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"hello over the data channel").await.unwrap();
        });

        let (control_client, control_server) = tokio::io::duplex(1024);
        let control = control_writer(control_server);
        let bytes = transfer(Direction::Receive, addr, &target, &control, options())
            .await
            .unwrap();
        client.await.unwrap();

        assert_eq!(bytes, 27);
        assert_eq!(
            std::fs::read(&target).unwrap(),
            b"hello over the data channel"
        );

        drop(control);
        let mut announced = String::new();
        let mut control_client = control_client;
        control_client.read_to_string(&mut announced).await.unwrap();
        assert_eq!(
            announced,
            "125 Data connection already open, starting transfer\r\n"
        );
    }

    #[tokio::test]
    async fn test_send_streams_file() {
        let storage = tempfile::tempdir().unwrap();
        let source = storage.path().join("data.bin");
        let payload: Vec<u8> = (0..=255u8).cycle().take(5000).collect();
        std::fs::write(&source, &payload).unwrap();
        let (listener, addr) = local_listener().await;

        let client = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let control = control_writer(tokio::io::sink());
        let bytes = transfer(Direction::Send, addr, &source, &control, options())
            .await
            .unwrap();

        assert_eq!(bytes, 5000);
        assert_eq!(client.await.unwrap(), payload);
    }

    #[tokio::test]
    async fn test_dial_failure() {
        // Bind then drop to get a port nobody listens on.
        let (listener, addr) = local_listener().await;
        drop(listener);

        let storage = tempfile::tempdir().unwrap();
        let control = control_writer(tokio::io::sink());
        let err = transfer(
            Direction::Receive,
            addr,
            &storage.path().join("x"),
            &control,
            options(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TransferError::Dial { .. }));
        assert_eq!(err.to_reply(), Reply::CantOpenDataConnection);
        assert!(!storage.path().join("x").exists());
    }

    #[tokio::test]
    async fn test_send_missing_file() {
        let (listener, addr) = local_listener().await;
        let client = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let storage = tempfile::tempdir().unwrap();
        let control = control_writer(tokio::io::sink());
        let err = transfer(
            Direction::Send,
            addr,
            &storage.path().join("missing"),
            &control,
            options(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TransferError::LocalFile { .. }));
        assert_eq!(err.to_reply(), Reply::FileUnavailable);
        // The data channel is closed on the error path too.
        assert!(client.await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stalled_peer_times_out() {
        let (listener, addr) = local_listener().await;
        let client = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
            drop(socket);
        });

        let storage = tempfile::tempdir().unwrap();
        let control = control_writer(tokio::io::sink());
        let options = TransferOptions {
            read_timeout: Duration::from_millis(200),
            buffer_size: 16,
        };
        let err = transfer(
            Direction::Receive,
            addr,
            &storage.path().join("slow.txt"),
            &control,
            options,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, TransferError::Timeout(_)));
        assert_eq!(err.to_reply(), Reply::TransferAborted);
        client.await.unwrap();
    }
}
