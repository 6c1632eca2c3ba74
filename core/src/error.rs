use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
  #[error("Could not find appropriate plugin resolver for `{0}` lang")]
  UnsupportedLang(String),
  #[error("Could not resolve `{request}` from {context}: {reason}")]
  Unresolved {
    request: String,
    context: String,
    reason: String,
  },
  #[error("Read file failed: {filename} {source}")]
  ReadFileFailed {
    filename: String,
    source: io::Error,
  },
  #[error("Invalid sergeant config: {0}")]
  Config(#[from] serde_json::Error),
  #[error("{0}")]
  IoError(io::Error),
}

impl From<io::Error> for LoaderError {
  fn from(err: io::Error) -> Self {
    Self::IoError(err)
  }
}
