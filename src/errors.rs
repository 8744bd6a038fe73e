use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fmt;

/// The different kinds of errors the library can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
  /// `Corruption` errors occur during decompression, indicating the
  /// provided words are inconsistent with the stream layout.
  Corruption,
  /// `InsufficientData` errors occur during decompression, indicating
  /// the decoder reached the end of the provided words before finishing.
  InsufficientData,
  /// `InvalidArgument` errors usually occur during compression, indicating
  /// the parameters provided to a function were invalid.
  InvalidArgument,
}

/// The error type used in results for all `pfor` functionality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PforError {
  pub kind: ErrorKind,
  pub message: String,
}

impl PforError {
  pub(crate) fn new<S: AsRef<str>>(kind: ErrorKind, message: S) -> Self {
    PforError {
      kind,
      message: message.as_ref().to_string(),
    }
  }

  pub(crate) fn corruption<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::Corruption, message)
  }

  pub(crate) fn insufficient_data<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::InsufficientData, message)
  }

  pub(crate) fn invalid_argument<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::InvalidArgument, message)
  }
}

impl Display for PforError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "pfor {:?} error: {}",
      self.kind, &self.message
    )
  }
}

impl Error for PforError {}

pub type PforResult<T> = Result<T, PforError>;
