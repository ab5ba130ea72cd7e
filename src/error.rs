use core::fmt;

use embedded_io::{ErrorKind, ReadExactError};

/// An error from loading a sprite.
///
/// All of these are produced by [`Sprite::open`](crate::Sprite::open) and
/// nothing is retried internally. Skipping a bad file and moving on to the
/// next one is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FormatError {
  /// The first two bytes weren't `BM`.
  NotABitmap,

  /// The info header isn't the 40 byte `BITMAPINFOHEADER`.
  ///
  /// Holds the header size that was found.
  UnsupportedHeader(u32),

  /// The image uses some compression. Only uncompressed data is supported.
  UnsupportedCompression(u32),

  /// Only 1, 4, 8, 24, and 32 bits per pixel are supported.
  UnsupportedBitDepth(u16),

  /// The width is zero or negative, or the height is zero.
  InvalidDimensions,

  /// The header declared more palette entries than the bit depth can index.
  PaletteTooLarge(u32),

  /// The source ended before all the data the header promises was read.
  TruncatedData,

  /// The byte source reported an error.
  Io(ErrorKind),

  /// The allocator couldn't give us enough space.
  Alloc,
}
impl FormatError {
  /// Converts any `embedded_io` error into this error type.
  #[inline]
  pub fn from_io<E: embedded_io::Error>(err: E) -> Self {
    Self::Io(err.kind())
  }
}
impl<E: embedded_io::Error> From<ReadExactError<E>> for FormatError {
  #[inline]
  fn from(err: ReadExactError<E>) -> Self {
    match err {
      ReadExactError::UnexpectedEof => Self::TruncatedData,
      ReadExactError::Other(e) => Self::from_io(e),
    }
  }
}
impl From<alloc::collections::TryReserveError> for FormatError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
impl fmt::Display for FormatError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NotABitmap => write!(f, "not a bitmap file"),
      Self::UnsupportedHeader(size) => write!(f, "cannot read bitmap header type = {size}"),
      Self::UnsupportedCompression(c) => write!(f, "cannot read compression type = {c}"),
      Self::UnsupportedBitDepth(bpp) => write!(f, "cannot read {bpp} bits per pixel"),
      Self::InvalidDimensions => write!(f, "bitmap width or height is out of range"),
      Self::PaletteTooLarge(len) => write!(f, "palette of {len} entries is too large"),
      Self::TruncatedData => write!(f, "bitmap data ended early"),
      Self::Io(kind) => write!(f, "read error: {kind:?}"),
      Self::Alloc => write!(f, "allocation failed"),
    }
  }
}

/// A fill request that can't be carried out.
///
/// Every one of these is checked before any byte of the output buffer is
/// touched, so a failed fill leaves the buffer as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RangeError {
  /// The view window has zero width or zero height.
  EmptyWindow,

  /// The view window extends past the edge of the bitmap.
  WindowOutOfBounds,

  /// The output buffer can't hold even a single output pixel.
  BufferTooSmall,

  /// A pixel of the requested range would be written past the end of the
  /// output buffer.
  RangeOutOfBounds,

  /// The write cursor can never land on the end of the requested range once
  /// it wraps around.
  RangeUnreachable,
}
impl fmt::Display for RangeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::EmptyWindow => write!(f, "view window is empty"),
      Self::WindowOutOfBounds => write!(f, "view window is outside the bitmap"),
      Self::BufferTooSmall => write!(f, "output buffer is smaller than one pixel"),
      Self::RangeOutOfBounds => write!(f, "pixel range runs past the output buffer"),
      Self::RangeUnreachable => write!(f, "pixel range end can't be reached after wrapping"),
    }
  }
}

/// An error from [`Sprite::render`](crate::Sprite::render).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError<E> {
  /// The fill was rejected and the sink was not called.
  Range(RangeError),
  /// The sink failed to show the buffer.
  Sink(E),
}
impl<E> From<RangeError> for RenderError<E> {
  #[inline]
  fn from(err: RangeError) -> Self {
    Self::Range(err)
  }
}
impl<E: fmt::Debug> fmt::Display for RenderError<E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Range(err) => fmt::Display::fmt(err, f),
      Self::Sink(err) => write!(f, "sink error: {err:?}"),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}
#[cfg(feature = "std")]
impl std::error::Error for RangeError {}
#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for RenderError<E> {}
