//! Iterators over a single row of BMP pixel data.
//!
//! These walk a row front to back. The random access decoding used while
//! filling buffers lives in [`crate::strategy`], these are the sequential
//! forms used for whole image decoding.

use super::*;

/// Iterate the palette indexes of one row, based on the bit depth.
///
/// Packed pixels have the leftmost pixel in the highest bits of each byte.
///
/// ## Panics
/// * The `bits_per_pixel` must be 1, 2, 4, or 8.
#[inline]
pub fn bmp_iter_pal_indexes(
  row: &[u8], width: u32, bits_per_pixel: u16,
) -> impl Iterator<Item = u8> + '_ {
  assert!(matches!(bits_per_pixel, 1 | 2 | 4 | 8));
  let count = u32::from(bits_per_pixel);
  row
    .iter()
    .copied()
    .flat_map(move |bits| U8BitIterHigh::from_count_and_bits(count, bits))
    .take(width as usize)
}

/// Iterates the colors of one 24bpp or 32bpp row.
///
/// The on-disk order is `[b, g, r]` (plus an unused fourth byte at 32bpp).
///
/// ## Panics
/// * The `bits_per_pixel` must be 24 or 32.
#[inline]
pub fn bmp_iter_bgr(
  row: &[u8], width: u32, bits_per_pixel: u16,
) -> impl Iterator<Item = r8g8b8_Srgb> + '_ {
  assert!(matches!(bits_per_pixel, 24 | 32));
  row
    .chunks_exact(usize::from(bits_per_pixel / 8))
    .take(width as usize)
    .map(|c| r8g8b8_Srgb { r: c[2], g: c[1], b: c[0] })
}
