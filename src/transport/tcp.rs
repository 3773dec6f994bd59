use std::io::ErrorKind;

use anyhow::anyhow;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::Transport;

/// Default limit for finishing a send, or a receive once its frame has started.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default wait for the next frame to start. A remote player may sit at the
/// prompt for a while between requests.
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Largest frame accepted from a peer (1 MB). A full game snapshot is a few KB.
const MAX_FRAME_LEN: u32 = 1_000_000;

/// Length-prefixed bincode frames over a TCP stream.
///
/// Each frame is a big-endian `u32` byte count followed by the encoded
/// `Message`. The idle timeout bounds the quiet time before a frame header
/// arrives; the I/O timeout bounds everything after that.
pub struct TcpTransport {
    stream: TcpStream,
    io_timeout: Duration,
    idle_timeout: Duration,
    max_frame_len: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_TIMEOUT, MAX_FRAME_LEN)
    }

    pub fn with_config(stream: TcpStream, io_timeout: Duration, max_frame_len: u32) -> Self {
        Self {
            stream,
            io_timeout,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_frame_len,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

fn io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {
            anyhow!("Connection closed by peer")
        }
        _ => anyhow!("I/O error: {}", e),
    }
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, payload: &[u8]) -> anyhow::Result<()> {
    let len = u32::try_from(payload.len()).map_err(|_| anyhow!("Frame length overflow"))?;
    writer.write_all(&len.to_be_bytes()).await.map_err(io_error)?;
    writer.write_all(payload).await.map_err(io_error)?;
    writer.flush().await.map_err(io_error)
}

async fn read_header<R: AsyncRead + Unpin>(reader: &mut R, max_len: u32) -> anyhow::Result<usize> {
    let mut header = [0u8; 4];
    reader.read_exact(&mut header).await.map_err(io_error)?;
    match u32::from_be_bytes(header) {
        0 => Err(anyhow!("Invalid frame length: 0")),
        len if len > max_len => Err(anyhow!("Frame too large: {} bytes (max: {})", len, max_len)),
        len => Ok(len as usize),
    }
}

async fn read_payload<R: AsyncRead + Unpin>(reader: &mut R, len: usize) -> anyhow::Result<Vec<u8>> {
    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await.map_err(io_error)?;
    Ok(payload)
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let payload = bincode::serialize(&msg).map_err(|e| anyhow!("Serialization error: {}", e))?;
        if payload.len() as u64 > u64::from(self.max_frame_len) {
            return Err(anyhow!(
                "Frame too large: {} bytes (max: {})",
                payload.len(),
                self.max_frame_len
            ));
        }
        let limit = self.io_timeout;
        timeout(limit, write_frame(&mut self.stream, &payload))
            .await
            .map_err(|_| anyhow!("Send timeout after {:?}", limit))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let idle = self.idle_timeout;
        let len = timeout(idle, read_header(&mut self.stream, self.max_frame_len))
            .await
            .map_err(|_| anyhow!("Idle timeout after {:?}", idle))??;
        let limit = self.io_timeout;
        let payload = timeout(limit, read_payload(&mut self.stream, len))
            .await
            .map_err(|_| anyhow!("Receive timeout after {:?}", limit))??;
        bincode::deserialize(&payload).map_err(|e| anyhow!("Deserialization error: {}", e))
    }
}
