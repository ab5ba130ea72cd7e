#![forbid(unsafe_code)]

//! Just has shorthands for pulling fixed size values out of a byte source.

use bytemuck::Pod;
use embedded_io::{Read, Seek, SeekFrom};

use crate::FormatError;

/// Moves the source to an absolute byte position.
#[inline]
pub(crate) fn seek_to<S: Seek>(source: &mut S, pos: u64) -> Result<(), FormatError> {
  source.seek(SeekFrom::Start(pos)).map_err(FormatError::from_io)?;
  Ok(())
}

/// The total length of the source, in bytes.
#[inline]
pub(crate) fn source_len<S: Seek>(source: &mut S) -> Result<u64, FormatError> {
  source.seek(SeekFrom::End(0)).map_err(FormatError::from_io)
}

/// Reads exactly `size_of::<T>()` bytes and reinterprets them as a `T`.
#[inline]
pub(crate) fn read_pod<T: Pod, S: Read>(source: &mut S) -> Result<T, FormatError> {
  let mut value = T::zeroed();
  source.read_exact(bytemuck::bytes_of_mut(&mut value))?;
  Ok(value)
}

/// Reads exactly `buf.len()` bytes.
#[inline]
pub(crate) fn read_into<S: Read>(source: &mut S, buf: &mut [u8]) -> Result<(), FormatError> {
  source.read_exact(buf)?;
  Ok(())
}
