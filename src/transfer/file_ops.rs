//! Module `file_ops`
//!
//! Local file access for copy and move, plus the chunked byte pump that moves
//! data between a local stream and the data channel.

use log::{debug, info};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::TransferError;

const BUFFER_SIZE: usize = 8192; // 8KB buffer for better performance

/// The local side of a transfer. The orchestrator only sees streams.
#[allow(async_fn_in_trait)]
pub trait LocalStore {
    type Reader: AsyncRead + Unpin;
    type Writer: AsyncWrite + Unpin;

    /// Opens the upload source for reading.
    async fn open(&self, path: &Path) -> io::Result<Self::Reader>;

    /// Creates (or truncates) the download destination for `path`.
    async fn create(&self, path: &Path) -> io::Result<Self::Writer>;

    /// Removes the upload source after a successful move.
    async fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Local filesystem store. Downloads land in `download_dir`, named after the
/// final segment of the requested local path.
#[derive(Debug, Clone)]
pub struct LocalFs {
    download_dir: PathBuf,
}

impl LocalFs {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    /// Resolves where a download requested as `path` is written.
    pub fn download_target(&self, path: &Path) -> io::Result<PathBuf> {
        let name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no file name in {}", path.display()),
            )
        })?;
        Ok(self.download_dir.join(name))
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new(".")
    }
}

impl LocalStore for LocalFs {
    type Reader = File;
    type Writer = File;

    async fn open(&self, path: &Path) -> io::Result<File> {
        debug!("Opening local source {}", path.display());
        File::open(path).await
    }

    async fn create(&self, path: &Path) -> io::Result<File> {
        let target = self.download_target(path)?;
        debug!("Creating local destination {}", target.display());
        File::create(target).await
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await?;
        info!("Removed local file {}", path.display());
        Ok(())
    }
}

/// Which end of a [`pump`] is the local file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalEnd {
    Reader,
    Writer,
}

/// Copies `reader` into `writer` until end of stream, then flushes.
///
/// Errors are attributed to the local file or the data channel according to
/// `local`, so callers can report which side failed.
pub async fn pump<R, W>(
    reader: &mut R,
    writer: &mut W,
    local: LocalEnd,
    label: &str,
) -> Result<u64, TransferError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let read_err = |e: io::Error| match local {
        LocalEnd::Reader => TransferError::LocalIo(label.to_string(), e),
        LocalEnd::Writer => TransferError::DataChannel(e),
    };
    let write_err = |e: io::Error| match local {
        LocalEnd::Writer => TransferError::LocalIo(label.to_string(), e),
        LocalEnd::Reader => TransferError::DataChannel(e),
    };

    let mut buffer = [0u8; BUFFER_SIZE];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buffer).await.map_err(read_err)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buffer[..n]).await.map_err(write_err)?;
        total += n as u64;
    }

    writer.flush().await.map_err(write_err)?;
    debug!("Pumped {} bytes for {}", total, label);
    Ok(total)
}
