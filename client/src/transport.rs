//! Frame transport (`spec.md` §4.E, external contract). This crate ships
//! one concrete implementation, [`TcpTransport`], over
//! `tokio::net::TcpStream`, so the library is usable end-to-end without a
//! host supplying its own; [`Transport`] stays a trait so a host can
//! substitute a pooled or mocked one.

use std::time::Duration;

use dubbo_wire_protocol::HEADER_LEN;
use tokio::io::{AsyncReadExt as _, AsyncWriteExt as _};
use tokio::net::TcpStream;

use crate::ClientError;

/// A full reply frame as read off the wire: the raw 16-byte header plus
/// its declared body.
#[derive(Debug, Clone)]
pub struct ReplyFrame {
    pub header: [u8; HEADER_LEN],
    pub body: Vec<u8>,
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends `frame` (a complete request frame, header included) to
    /// `host:port` and returns the matching reply frame, or fails with
    /// [`ClientError::Timeout`] / [`ClientError::TransportFailure`].
    async fn call(
        &self,
        host: &str,
        port: u16,
        frame: &[u8],
        timeout: Duration,
        invoke_id: u64,
    ) -> Result<ReplyFrame, ClientError>;
}

/// Opens a fresh TCP connection per call. No pooling, no keep-alive —
/// `spec.md` §5 specifies one request sends one frame and awaits one
/// reply; connection reuse is a host-level optimization, not a
/// requirement this crate takes on.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpTransport;

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn call(
        &self,
        host: &str,
        port: u16,
        frame: &[u8],
        timeout: Duration,
        invoke_id: u64,
    ) -> Result<ReplyFrame, ClientError> {
        tokio::time::timeout(timeout, self.call_inner(host, port, frame))
            .await
            .map_err(|_| ClientError::Timeout {
                invoke_id,
                timeout_ms: timeout.as_millis() as u64,
            })?
    }
}

impl TcpTransport {
    async fn call_inner(&self, host: &str, port: u16, frame: &[u8]) -> Result<ReplyFrame, ClientError> {
        let mut stream = TcpStream::connect((host, port))
            .await
            .map_err(ClientError::TransportFailure)?;
        stream.write_all(frame).await.map_err(ClientError::TransportFailure)?;

        let mut header = [0u8; HEADER_LEN];
        stream.read_exact(&mut header).await.map_err(ClientError::TransportFailure)?;

        let body_len = u32::from_be_bytes(header[12..16].try_into().expect("4 bytes"));
        let mut body = vec![0u8; body_len as usize];
        stream.read_exact(&mut body).await.map_err(ClientError::TransportFailure)?;

        Ok(ReplyFrame { header, body })
    }
}
