#![forbid(unsafe_code)]

//! Random access pixel decoding, one strategy per supported bit depth.
//!
//! The strategy is picked once when a sprite loads. Hot loops then go through
//! [`DecodeStrategy::dispatch`], which matches on the strategy a single time
//! and hands a concrete decoder to the loop, so each bit depth gets its own
//! compiled copy of the loop and nothing branches on bit depth per pixel.

use pixel_formats::r8g8b8_Srgb;

/// How the stored pixel data becomes colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStrategy {
  /// `[b, g, r, _]` per pixel.
  Direct32,
  /// `[b, g, r]` per pixel.
  Direct24,
  /// One palette index per byte.
  Palette8,
  /// Two palette indexes per byte, high bits first.
  Palette4,
  /// Eight palette indexes per byte, high bit first.
  Palette1,
}
impl DecodeStrategy {
  /// Picks the strategy for a bit depth, or `None` if it's unsupported.
  #[inline]
  #[must_use]
  pub const fn for_bit_depth(bits_per_pixel: u16) -> Option<Self> {
    Some(match bits_per_pixel {
      32 => Self::Direct32,
      24 => Self::Direct24,
      8 => Self::Palette8,
      4 => Self::Palette4,
      1 => Self::Palette1,
      _ => return None,
    })
  }

  /// The bit depth this strategy decodes.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(self) -> u16 {
    match self {
      Self::Direct32 => 32,
      Self::Direct24 => 24,
      Self::Palette8 => 8,
      Self::Palette4 => 4,
      Self::Palette1 => 1,
    }
  }

  /// If this strategy reads colors out of a palette.
  #[inline]
  #[must_use]
  pub const fn uses_palette(self) -> bool {
    !matches!(self, Self::Direct32 | Self::Direct24)
  }

  /// Builds the concrete decoder for this strategy and passes it to the
  /// visitor.
  #[inline]
  pub(crate) fn dispatch<V: DecoderVisitor>(
    self, pixels: &[u8], row_stride: usize, palette: &[r8g8b8_Srgb], visitor: V,
  ) -> V::Output {
    match self {
      Self::Direct32 => visitor.visit(Direct::<4> { pixels, row_stride }),
      Self::Direct24 => visitor.visit(Direct::<3> { pixels, row_stride }),
      Self::Palette8 => visitor.visit(Indexed8 { pixels, row_stride, palette }),
      Self::Palette4 => visitor.visit(Packed::<4> { pixels, row_stride, palette }),
      Self::Palette1 => visitor.visit(Packed::<1> { pixels, row_stride, palette }),
    }
  }
}

/// Gets the color at a bitmap-space `(row, col)`.
///
/// `row` is a storage row (so row 0 is the bottom row of a bottom-up bitmap).
/// Positions must be within the bitmap.
pub(crate) trait PixelDecoder {
  fn decode(&self, row: usize, col: usize) -> r8g8b8_Srgb;
}

/// Something that runs with whatever decoder a strategy picks.
pub(crate) trait DecoderVisitor {
  type Output;
  fn visit<D: PixelDecoder>(self, decoder: D) -> Self::Output;
}

pub(crate) struct Direct<'p, const BYTES: usize> {
  pixels: &'p [u8],
  row_stride: usize,
}
impl<const BYTES: usize> PixelDecoder for Direct<'_, BYTES> {
  #[inline]
  fn decode(&self, row: usize, col: usize) -> r8g8b8_Srgb {
    let o = row * self.row_stride + col * BYTES;
    r8g8b8_Srgb { r: self.pixels[o + 2], g: self.pixels[o + 1], b: self.pixels[o] }
  }
}

#[inline]
fn palette_lookup(palette: &[r8g8b8_Srgb], index: u8) -> r8g8b8_Srgb {
  // the palette can be shorter than the bit depth allows, out of range
  // indexes are black.
  palette.get(usize::from(index)).copied().unwrap_or_default()
}

pub(crate) struct Indexed8<'p> {
  pixels: &'p [u8],
  row_stride: usize,
  palette: &'p [r8g8b8_Srgb],
}
impl PixelDecoder for Indexed8<'_> {
  #[inline]
  fn decode(&self, row: usize, col: usize) -> r8g8b8_Srgb {
    palette_lookup(self.palette, self.pixels[row * self.row_stride + col])
  }
}

pub(crate) struct Packed<'p, const BITS: usize> {
  pixels: &'p [u8],
  row_stride: usize,
  palette: &'p [r8g8b8_Srgb],
}
impl<const BITS: usize> Packed<'_, BITS> {
  const PER_BYTE: usize = 8 / BITS;
  const MASK: u8 = ((1_u16 << BITS) - 1) as u8;

  /// The palette index at a position.
  #[inline]
  fn index(&self, row: usize, col: usize) -> u8 {
    let byte = self.pixels[row * self.row_stride + col / Self::PER_BYTE];
    let shift = BITS * ((Self::PER_BYTE - 1) - (col % Self::PER_BYTE));
    (byte >> shift) & Self::MASK
  }
}
impl<const BITS: usize> PixelDecoder for Packed<'_, BITS> {
  #[inline]
  fn decode(&self, row: usize, col: usize) -> r8g8b8_Srgb {
    palette_lookup(self.palette, self.index(row, col))
  }
}
