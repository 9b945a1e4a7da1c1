use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crawler_logging::crawler_debug;
use futures_util::{Stream, StreamExt};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::{ApiError, FailureKind};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("invalid export file name: {0:?}")]
    FileName(String),
    #[error("export exceeds {max_bytes} bytes (got {actual})")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("download interrupted: {0}")]
    Source(ApiError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Source(err) => err,
            ExportError::TooLarge { max_bytes, actual } => ApiError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: Some(actual),
                },
                "response too large",
            ),
            other => ApiError::new(FailureKind::Io, other.to_string()),
        }
    }
}

/// Destination for the CSV export served by `GET /download`.
///
/// The body is streamed into a temp file next to the target and renamed into
/// place only once complete, so an interrupted or oversized download leaves
/// any earlier export untouched.
#[derive(Debug, Clone)]
pub struct CsvExport {
    dir: PathBuf,
    max_bytes: u64,
}

impl CsvExport {
    pub fn new(dir: PathBuf, max_bytes: u64) -> Self {
        Self { dir, max_bytes }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Drains `body` into `{dir}/{filename}`.
    ///
    /// `declared_len` is the response's Content-Length, checked before any
    /// chunk is read. The running total is checked again per chunk since the
    /// header may be absent or wrong.
    pub async fn save<S, B>(
        &self,
        filename: &str,
        declared_len: Option<u64>,
        body: S,
    ) -> Result<PathBuf, ExportError>
    where
        S: Stream<Item = Result<B, ApiError>>,
        B: AsRef<[u8]>,
    {
        if filename.is_empty() || filename.contains(['/', '\\']) || filename == ".." {
            return Err(ExportError::FileName(filename.to_string()));
        }
        if let Some(len) = declared_len.filter(|len| *len > self.max_bytes) {
            return Err(ExportError::TooLarge {
                max_bytes: self.max_bytes,
                actual: len,
            });
        }
        prepare_dir(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        let mut written: u64 = 0;
        let mut body = std::pin::pin!(body);
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(ExportError::Source)?;
            let chunk = chunk.as_ref();
            written += chunk.len() as u64;
            if written > self.max_bytes {
                return Err(ExportError::TooLarge {
                    max_bytes: self.max_bytes,
                    actual: written,
                });
            }
            tmp.write_all(chunk)?;
        }
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        let target = self.dir.join(filename);
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|err| ExportError::Io(err.error))?;
        crawler_debug!("Wrote {} bytes to {:?}", written, target);
        Ok(target)
    }
}

fn prepare_dir(dir: &Path) -> Result<(), ExportError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ExportError::OutputDir(format!("{} is not a directory", dir.display()))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| ExportError::OutputDir(err.to_string()))
        }
        Err(err) => Err(ExportError::OutputDir(err.to_string())),
    }
}
