use std::io;

use thiserror::Error;

/// Coarse classification of an [`Error`], so callers can tell "not QOI data"
/// apart from "I/O failure" and "bad arguments" without matching every
/// variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
  /// The caller passed an invalid argument.
  Argument,
  /// The input is not a valid QOI image.
  Format,
  /// The input ended before a complete image was read.
  Truncated,
  /// The underlying reader or writer failed.
  Io,
}

/// An enumeration of all error values this crate may produce.
#[derive(Debug, Error)]
pub enum Error {
  /// A channel count other than 3 or 4 was given for an image, or other than
  /// 0, 3 or 4 was requested from the decoder.
  #[error("invalid channel count {0}, expected 3 or 4 (or 0 when decoding)")]
  InvalidChannels(u8),
  /// An image was constructed with a zero width or height.
  #[error("invalid image dimensions {width}x{height}")]
  InvalidDimensions { width: u32, height: u32 },
  /// An image was constructed with a pixel buffer of the wrong size.
  #[error("invalid pixel data length: expected {expected} bytes, got {actual}")]
  InvalidDataLength { expected: usize, actual: usize },

  /// The first four bytes are not `qoif`, so this is probably not a QOI image.
  #[error("invalid magic value {0:02x?}, probably not a QOI image")]
  InvalidMagic([u8; 4]),
  /// The header stores a width of zero.
  #[error("invalid image width in header")]
  InvalidWidth,
  /// The header stores a height of zero.
  #[error("invalid image height in header")]
  InvalidHeight,
  /// The header stores a channel count other than 3 or 4.
  #[error("invalid stored channel count {0}")]
  InvalidStoredChannels(u8),
  /// Failed to derive a supported colorspace from a QOI image.
  #[error("invalid image colorspace {0}, expected 0 for sRGB or 1 for linear")]
  InvalidColorspace(u8),
  /// The eight bytes following the last chunk are not the end marker.
  #[error("invalid end marker")]
  InvalidTrailer,
  /// A run chunk repeats a pixel past the end of the image.
  #[error("run exceeds the number of remaining pixels")]
  RunOverflow,
  /// The header dimensions overflow the addressable pixel buffer size.
  #[error("image {width}x{height} is too large to decode")]
  ImageTooLarge { width: u32, height: u32 },

  /// Unexpectedly reached the end of an image source before decoding was
  /// completed.
  #[error("unexpectedly reached end of stream before decoding was completed")]
  UnexpectedEof,

  /// Any other `std::io::Error` raised by the image source or destination.
  #[error(transparent)]
  Io(io::Error),
}

impl Error {
  /// Returns the category this error belongs to.
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::InvalidChannels(_)
      | Error::InvalidDimensions { .. }
      | Error::InvalidDataLength { .. } => ErrorKind::Argument,
      Error::InvalidMagic(_)
      | Error::InvalidWidth
      | Error::InvalidHeight
      | Error::InvalidStoredChannels(_)
      | Error::InvalidColorspace(_)
      | Error::InvalidTrailer
      | Error::RunOverflow
      | Error::ImageTooLarge { .. } => ErrorKind::Format,
      Error::UnexpectedEof => ErrorKind::Truncated,
      Error::Io(_) => ErrorKind::Io,
    }
  }
}

// `read_exact` reports a short source as an `io::Error`; keep that distinct
// from genuine I/O failures.
impl From<io::Error> for Error {
  fn from(io_err: io::Error) -> Self {
    match io_err.kind() {
      io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
      _ => Error::Io(io_err),
    }
  }
}

#[cfg(test)]
impl PartialEq for Error {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Error::InvalidChannels(a), Error::InvalidChannels(b)) => a == b,
      (
        Error::InvalidDimensions { width: wa, height: ha },
        Error::InvalidDimensions { width: wb, height: hb },
      ) => wa == wb && ha == hb,
      (
        Error::InvalidDataLength { expected: ea, actual: aa },
        Error::InvalidDataLength { expected: eb, actual: ab },
      ) => ea == eb && aa == ab,
      (Error::InvalidMagic(a), Error::InvalidMagic(b)) => a == b,
      (Error::InvalidWidth, Error::InvalidWidth) => true,
      (Error::InvalidHeight, Error::InvalidHeight) => true,
      (Error::InvalidStoredChannels(a), Error::InvalidStoredChannels(b)) => a == b,
      (Error::InvalidColorspace(a), Error::InvalidColorspace(b)) => a == b,
      (Error::InvalidTrailer, Error::InvalidTrailer) => true,
      (Error::RunOverflow, Error::RunOverflow) => true,
      (
        Error::ImageTooLarge { width: wa, height: ha },
        Error::ImageTooLarge { width: wb, height: hb },
      ) => wa == wb && ha == hb,
      (Error::UnexpectedEof, Error::UnexpectedEof) => true,
      (Error::Io(a), Error::Io(b)) => a.kind() == b.kind(),
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_short_read_maps_to_unexpected_eof() {
    let err = Error::from(io::Error::from(io::ErrorKind::UnexpectedEof));
    assert_eq!(err, Error::UnexpectedEof);
    assert_eq!(err.kind(), ErrorKind::Truncated);
  }

  #[test]
  fn test_other_io_errors_pass_through() {
    let err = Error::from(io::Error::new(io::ErrorKind::PermissionDenied, "nope"));
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.to_string(), "nope");
  }

  #[test]
  fn test_error_kinds() {
    assert_eq!(Error::InvalidChannels(2).kind(), ErrorKind::Argument);
    assert_eq!(Error::InvalidMagic(*b"qoix").kind(), ErrorKind::Format);
    assert_eq!(Error::InvalidTrailer.kind(), ErrorKind::Format);
    assert_eq!(Error::RunOverflow.kind(), ErrorKind::Format);
  }
}
