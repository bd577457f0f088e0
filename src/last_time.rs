use std::fs::{self, File};
use std::io::{self, Read as _};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// At most this many bytes of the state file are read.
const MAX_STATE_LEN: u64 = 10;

#[derive(Debug, Error)]
pub enum LastTimeError {
    #[error("failed to read last timestamp file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("last timestamp file {path:?} does not hold an integer: {content:?}")]
    Corrupt { path: PathBuf, content: String },

    #[error("failed to write last timestamp file {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The file remembering the `time` of the last published reading.
#[derive(Debug, Clone)]
pub struct LastTimeFile {
    path: PathBuf,
}

impl LastTimeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when the file does not exist yet.
    pub fn read(&self) -> Result<Option<i64>, LastTimeError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(LastTimeError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut buf = Vec::new();
        file.take(MAX_STATE_LEN)
            .read_to_end(&mut buf)
            .map_err(|source| LastTimeError::Read {
                path: self.path.clone(),
                source,
            })?;

        let content = String::from_utf8_lossy(&buf);
        content
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| LastTimeError::Corrupt {
                path: self.path.clone(),
                content: content.into_owned(),
            })
    }

    /// Overwrites the file with `time` as decimal text, without a trailing newline.
    pub fn write(&self, time: i64) -> Result<(), LastTimeError> {
        fs::write(&self.path, time.to_string()).map_err(|source| LastTimeError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
