//! File-system stream backend.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::SinkError;
use crate::stream::{OutputStream, StreamOpener};

/// Append-mode file handle. Write-only: other processes may read the file
/// while it is open, this handle never does.
pub struct FileStream {
    file: Option<File>,
    path: PathBuf,
}

impl FileStream {
    fn new(file: File, path: PathBuf) -> Self {
        Self {
            file: Some(file),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file_mut(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other(format!("{} is closed", self.path.display())))
    }
}

impl OutputStream for FileStream {
    fn can_read(&self) -> bool {
        false
    }

    fn can_write(&self) -> bool {
        self.file.is_some()
    }

    fn can_seek(&self) -> bool {
        self.file.is_some()
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.file_mut()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file_mut()?.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Production [`StreamOpener`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStreamOpener;

impl StreamOpener for FileStreamOpener {
    fn open_append_or_create(&self, path: &Path) -> Result<Box<dyn OutputStream>, SinkError> {
        let open_err = |source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(open_err)?;
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(open_err)?;

        tracing::debug!(path = %path.display(), "opened output file");
        Ok(Box::new(FileStream::new(file, path.to_path_buf())))
    }
}
