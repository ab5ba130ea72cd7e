#![forbid(unsafe_code)]

//! An in-memory byte source.

use embedded_io::{ErrorKind, ErrorType, Read, Seek, SeekFrom};

/// A seekable reader over a borrowed byte slice.
///
/// This lets a sprite be loaded from bytes that are already in memory (an
/// `include_bytes!` asset, a flash region, a test fixture) through the same
/// path that reads files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSource<'b> {
  bytes: &'b [u8],
  pos: usize,
}
impl<'b> SliceSource<'b> {
  /// Makes a new source positioned at the start of the bytes.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes, pos: 0 }
  }

  /// The current read position.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> usize {
    self.pos
  }
}
impl ErrorType for SliceSource<'_> {
  type Error = ErrorKind;
}
impl Read for SliceSource<'_> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
    let rest = self.bytes.get(self.pos..).unwrap_or_default();
    let count = rest.len().min(buf.len());
    buf[..count].copy_from_slice(&rest[..count]);
    self.pos += count;
    Ok(count)
  }
}
impl Seek for SliceSource<'_> {
  #[inline]
  fn seek(&mut self, pos: SeekFrom) -> Result<u64, Self::Error> {
    let target: Option<u64> = match pos {
      SeekFrom::Start(p) => Some(p),
      SeekFrom::End(delta) => (self.bytes.len() as u64).checked_add_signed(delta),
      SeekFrom::Current(delta) => (self.pos as u64).checked_add_signed(delta),
    };
    // Seeking past the end is allowed, reads from there just return 0 bytes.
    let target = target.ok_or(ErrorKind::InvalidInput)?;
    self.pos = usize::try_from(target).map_err(|_| ErrorKind::InvalidInput)?;
    Ok(target)
  }
}
