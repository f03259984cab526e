//! Module `data_channel`
//!
//! A secured data connection carrying exactly one listing or file payload.
//! It is read or written to completion once and then closed.

use log::{debug, info};
use std::net::SocketAddrV4;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::TransferError;
use crate::session::BoxedStream;
use crate::transfer::file_ops::{LocalEnd, pump};

pub struct DataChannel {
    stream: BufReader<BoxedStream>,
    peer: SocketAddrV4,
}

impl DataChannel {
    pub fn new(stream: BoxedStream, peer: SocketAddrV4) -> Self {
        Self {
            stream: BufReader::new(stream),
            peer,
        }
    }

    /// Reads the next line without its terminator; `None` at end of stream.
    ///
    /// Repeated calls walk the payload once; it cannot be restarted.
    pub async fn next_line(&mut self) -> Result<Option<String>, TransferError> {
        let mut buf = Vec::new();
        let n = self
            .stream
            .read_until(b'\n', &mut buf)
            .await
            .map_err(TransferError::DataChannel)?;
        if n == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Writes every remaining line to `sink`, one per `\n`-terminated line.
    pub async fn drain_lines<W>(&mut self, sink: &mut W) -> Result<usize, TransferError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let sink_err = |e: std::io::Error| TransferError::LocalIo("output".to_string(), e);
        let mut count = 0;
        while let Some(line) = self.next_line().await? {
            sink.write_all(line.as_bytes()).await.map_err(sink_err)?;
            sink.write_all(b"\n").await.map_err(sink_err)?;
            count += 1;
        }
        sink.flush().await.map_err(sink_err)?;
        debug!("Read {} listing lines from {}", count, self.peer);
        Ok(count)
    }

    /// Downloads the whole payload into `writer`.
    pub async fn receive_into<W>(&mut self, writer: &mut W, label: &str) -> Result<u64, TransferError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let bytes = pump(&mut self.stream, writer, LocalEnd::Writer, label).await?;
        info!("Received {} bytes into {}", bytes, label);
        Ok(bytes)
    }

    /// Uploads everything `reader` yields.
    pub async fn send_from<R>(&mut self, reader: &mut R, label: &str) -> Result<u64, TransferError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let bytes = pump(reader, self.stream.get_mut(), LocalEnd::Reader, label).await?;
        info!("Sent {} bytes from {}", bytes, label);
        Ok(bytes)
    }

    /// Shuts the channel down, ending the upload stream for the server.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.get_mut().shutdown().await {
            debug!("Data channel shutdown for {}: {}", self.peer, e);
        }
        info!("Data channel to {} closed", self.peer);
    }
}
