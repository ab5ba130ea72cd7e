use super::*;

/// The parts of a BMP header that sprite rendering needs.
///
/// A full BMP header is split into the "file header" and "info header", and
/// most of the fields are useless for our purposes (eg: intended physical
/// dimensions of the image). This collects the important info in a consistent
/// form, after it's been validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BmpHeader {
  /// The byte index within the file where the pixel data starts.
  pub pixel_data_offset: u32,

  /// Size of the info header. Always 40 once parsing succeeds.
  pub info_header_size: u32,

  /// Image width in pixels.
  pub width: u32,

  /// Image height in pixels.
  pub height: u32,

  /// If the rows are stored top row first.
  ///
  /// BMP files normally store the bottom row first, a negative height in the
  /// file flips that.
  pub top_to_bottom: bool,

  /// One of 1, 4, 8, 24, or 32.
  pub bits_per_pixel: u16,

  /// Number of palette entries. Zero for direct color images.
  pub palette_len: usize,
}
impl BmpHeader {
  /// Bytes per row of pixel data, including the padding to 4 bytes.
  #[inline]
  #[must_use]
  pub const fn row_stride(&self) -> usize {
    let bits_per_line = (self.bits_per_pixel as usize).saturating_mul(self.width as usize);
    (bits_per_line.saturating_add(31) / 32).saturating_mul(4)
  }

  /// Total bytes of pixel data.
  ///
  /// Saturates rather than overflowing, a header that big can't be loaded
  /// anyway.
  #[inline]
  #[must_use]
  pub const fn pixel_data_len(&self) -> usize {
    self.row_stride().saturating_mul(self.height as usize)
  }

  /// If the image stores palette indexes rather than direct colors.
  #[inline]
  #[must_use]
  pub const fn is_indexed(&self) -> bool {
    self.bits_per_pixel < 24
  }

  /// Byte position of the palette within the file.
  #[inline]
  #[must_use]
  pub const fn palette_offset(&self) -> u64 {
    SIZE_OF_FILE_HEADER + self.info_header_size as u64
  }
}

/// Reads and validates the file header and info header.
///
/// The source can be at any position, this always starts from byte 0. After
/// this returns the source position is unspecified.
///
/// ## Failure
/// Checks happen in this order, and the first failure is returned:
/// * The tag must be `BM`.
/// * The info header must be the 40 byte `BITMAPINFOHEADER`.
/// * The compression must be `BI_RGB` (none).
/// * The bit depth must be 1, 4, 8, 24, or 32.
/// * The width must be positive and the height non-zero.
/// * The palette length can't exceed `2**bits_per_pixel`.
pub fn bmp_read_header<S: Read + Seek>(source: &mut S) -> Result<BmpHeader, FormatError> {
  seek_to(source, 0)?;
  let file_header: BitmapFileHeader = read_pod(source)?;
  if &file_header.ty != b"BM" {
    return Err(FormatError::NotABitmap);
  }
  let info_header_size: U32LE = read_pod(source)?;
  let info_header_size = info_header_size.get();
  if info_header_size != SIZE_OF_INFO_HEADER {
    return Err(FormatError::UnsupportedHeader(info_header_size));
  }
  let info: BitmapInfoHeaderBody = read_pod(source)?;
  let compression = info.compression.get();
  if compression != BI_RGB {
    return Err(FormatError::UnsupportedCompression(compression));
  }
  let bits_per_pixel = info.bits_per_pixel.get();
  if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
    return Err(FormatError::UnsupportedBitDepth(bits_per_pixel));
  }
  let width = info.width.get();
  let height = info.height.get();
  if width <= 0 || height == 0 {
    return Err(FormatError::InvalidDimensions);
  }
  let palette_len = if bits_per_pixel < 24 {
    let max_len: u32 = 1 << bits_per_pixel;
    match info.colors_used.get() {
      0 => max_len,
      n if n <= max_len => n,
      n => return Err(FormatError::PaletteTooLarge(n)),
    }
  } else {
    0
  };
  let header = BmpHeader {
    pixel_data_offset: file_header.bitmap_offset.get(),
    info_header_size,
    width: width.unsigned_abs(),
    height: height.unsigned_abs(),
    top_to_bottom: height < 0,
    bits_per_pixel,
    palette_len: palette_len as usize,
  };
  trace!("BMP header: {header:?}");
  Ok(header)
}
