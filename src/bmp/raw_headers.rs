//! These are the on-disk header structs, exactly as laid out in the file.
//!
//! Every field is an alignment 1 little-endian value, so the structs have no
//! padding and can be read straight out of the byte source.

use pack1::*;

pub(crate) const BI_RGB: u32 = 0;
pub(crate) const SIZE_OF_FILE_HEADER: u64 = 14;
pub(crate) const SIZE_OF_INFO_HEADER: u32 = 40;

/// The 14 byte header at the start of every BMP file.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct BitmapFileHeader {
  pub ty: [u8; 2],
  pub file_size: U32LE,
  pub reserved1: U16LE,
  pub reserved2: U16LE,
  pub bitmap_offset: U32LE,
}

/// The 40 byte `BITMAPINFOHEADER`, minus its leading size field.
///
/// The size field is read on its own first so that the header version can be
/// checked before the rest of the header is trusted.
#[derive(Debug, Clone, Copy, bytemuck::Zeroable, bytemuck::Pod)]
#[repr(C)]
pub(crate) struct BitmapInfoHeaderBody {
  pub width: I32LE,
  pub height: I32LE,
  pub planes: U16LE,
  pub bits_per_pixel: U16LE,
  pub compression: U32LE,
  pub image_size: U32LE,
  pub pixels_per_meter_x: I32LE,
  pub pixels_per_meter_y: I32LE,
  pub colors_used: U32LE,
  pub important_colors: U32LE,
}
