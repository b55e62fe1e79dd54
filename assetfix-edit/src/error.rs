//! Per-file error types for assetfix-edit.
//!
//! Every variant is contained at the file boundary: the walker records it in
//! the change report and moves on to the next file.

use assetfix_types::FailureKind;
use camino::{Utf8Path, Utf8PathBuf};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// The file could not be read.
    #[error("read failed: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bytes are not valid UTF-8.
    #[error("not valid UTF-8 text: {source}")]
    Decode {
        path: Utf8PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The rewritten text could not be persisted. The original is intact.
    #[error("write failed: {source}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory entry could not be listed.
    #[error("walk failed: {message}")]
    Walk { path: Utf8PathBuf, message: String },

    /// A file whose path is not valid UTF-8; `path` is the lossy rendering.
    #[error("path is not valid UTF-8")]
    NonUtf8Path { path: Utf8PathBuf },
}

impl AssetError {
    pub fn path(&self) -> &Utf8Path {
        match self {
            AssetError::Read { path, .. }
            | AssetError::Decode { path, .. }
            | AssetError::Write { path, .. }
            | AssetError::Walk { path, .. }
            | AssetError::NonUtf8Path { path } => path,
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AssetError::Read { .. } => FailureKind::Read,
            AssetError::Decode { .. } => FailureKind::Decode,
            AssetError::Write { .. } => FailureKind::Write,
            AssetError::Walk { .. } | AssetError::NonUtf8Path { .. } => FailureKind::Walk,
        }
    }
}

pub type AssetResult<T> = Result<T, AssetError>;
