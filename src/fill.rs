//! Writing a sprite's window into an LED output buffer.
//!
//! The output buffer is treated as a ring. The write cursor starts at
//! `byte_start + first * bytes_per_pixel`, advances one output pixel at a time,
//! wraps to byte 0 when it reaches the end of the buffer, and stops after the
//! pixel at `byte_start + last * bytes_per_pixel` is written. This lets one
//! sprite be spread over part of a longer LED chain, or over a chain that
//! doesn't start at the beginning of the buffer, without extra copying.
//!
//! If the range covers more pixels than the window holds, the window's pixels
//! repeat from the start.

use core::ops::RangeInclusive;

use pixel_formats::r8g8b8_Srgb;

use crate::{
  strategy::{DecoderVisitor, PixelDecoder},
  ChannelLayout, ChannelOffsets, RangeError, ViewWindow,
};

/// Options for [`Sprite::fill_buffer`](crate::Sprite::fill_buffer).
///
/// The default fills the whole buffer from byte 0 with no blending.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FillOptions {
  /// First and last output pixel to write, inclusive.
  ///
  /// Pixel `n` starts at byte `byte_start + n * bytes_per_pixel`. The last
  /// pixel can be *before* the first one, in which case the write wraps
  /// around the end of the buffer. `None` means every whole pixel in the
  /// buffer.
  pub pixel_range: Option<RangeInclusive<usize>>,

  /// Byte offset added to every pixel position.
  pub byte_start: usize,

  /// Mix the new colors with what's already in the buffer.
  ///
  /// `1.0` is all new color, `0.0` leaves the old color. Values outside
  /// `0.0 ..= 1.0` are clamped. The alpha byte of DotStar layouts is never
  /// blended.
  pub blend: Option<f32>,
}
impl FillOptions {
  /// Same as the default: whole buffer, no blending.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the first and last output pixel to write.
  #[inline]
  #[must_use]
  pub fn with_pixel_range(mut self, range: RangeInclusive<usize>) -> Self {
    self.pixel_range = Some(range);
    self
  }

  /// Sets the byte offset of output pixel 0.
  #[inline]
  #[must_use]
  pub fn with_byte_start(mut self, byte_start: usize) -> Self {
    self.byte_start = byte_start;
    self
  }

  /// Sets the blend factor, see [`blend`](Self::blend).
  #[inline]
  #[must_use]
  pub fn with_blend(mut self, blend: f32) -> Self {
    self.blend = Some(blend);
    self
  }
}

/// Where a fill starts and how many pixels it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FillPlan {
  pub start: usize,
  pub count: usize,
}

/// Checks the requested range against the buffer, and works out exactly how
/// many pixels the cursor writes before landing on the end of the range.
///
/// Every position the cursor visits is checked to hold a whole output pixel.
pub(crate) fn plan_fill(
  buffer_len: usize, bytes_per_pixel: usize, options: &FillOptions,
) -> Result<FillPlan, RangeError> {
  let s = bytes_per_pixel;
  if buffer_len < s {
    return Err(RangeError::BufferTooSmall);
  }
  let (first, last) = match &options.pixel_range {
    Some(range) => (*range.start(), *range.end()),
    None => (0, buffer_len / s - 1),
  };
  let position = |n: usize| {
    n.checked_mul(s).and_then(|b| b.checked_add(options.byte_start)).ok_or(RangeError::RangeOutOfBounds)
  };
  let start = position(first)?;
  let end = position(last)?;
  let count = if start <= end {
    // reaches the end before it would ever wrap.
    if end.checked_add(s).map_or(true, |past_end| past_end > buffer_len) {
      return Err(RangeError::RangeOutOfBounds);
    }
    (end - start) / s + 1
  } else {
    // runs to the end of the buffer, wraps to 0, then steps by whole pixels.
    if start >= buffer_len || (buffer_len - start) % s != 0 {
      return Err(RangeError::RangeOutOfBounds);
    }
    if end % s != 0 {
      return Err(RangeError::RangeUnreachable);
    }
    (buffer_len - start) / s + end / s + 1
  };
  Ok(FillPlan { start, count })
}

/// Every `(row, col)` of the window in visiting order, as storage positions.
///
/// Window rows count down from the top of the image. In a bottom-up bitmap
/// the top row is the last storage row, so those rows are visited in
/// descending storage order.
pub(crate) fn window_positions(
  window: ViewWindow, bitmap_height: u32, top_to_bottom: bool,
) -> impl Iterator<Item = (usize, usize)> + Clone {
  let ViewWindow { x, y, width, height } = window;
  let (x, y, width) = (x as usize, y as usize, width as usize);
  let bitmap_height = bitmap_height as usize;
  (0..height as usize).flat_map(move |i| {
    let row = if top_to_bottom { y + i } else { bitmap_height - y - 1 - i };
    (x..x + width).map(move |col| (row, col))
  })
}

/// Runs a planned fill with whatever decoder the sprite's strategy picks.
pub(crate) struct WindowFill<'b, I> {
  pub buffer: &'b mut [u8],
  pub layout: ChannelLayout,
  pub plan: FillPlan,
  pub blend: Option<f32>,
  pub positions: I,
}
impl<I> DecoderVisitor for WindowFill<'_, I>
where
  I: Iterator<Item = (usize, usize)> + Clone,
{
  type Output = usize;

  fn visit<D: PixelDecoder>(self, decoder: D) -> usize {
    let Self { buffer, layout, plan, blend, positions } = self;
    let offsets = layout.offsets();
    let s = layout.bytes_per_pixel();
    let blend = blend.map(|f| f.clamp(0.0, 1.0));
    let mut cursor = plan.start;
    for (row, col) in positions.cycle().take(plan.count) {
      let color = decoder.decode(row, col);
      write_pixel(&mut buffer[cursor..cursor + s], offsets, color, blend);
      cursor += s;
      if cursor >= buffer.len() {
        cursor = 0;
      }
    }
    plan.count
  }
}

/// Writes one color into one output pixel.
#[inline]
pub(crate) fn write_pixel(
  out: &mut [u8], offsets: ChannelOffsets, color: r8g8b8_Srgb, blend: Option<f32>,
) {
  let r8g8b8_Srgb { mut r, mut g, mut b } = color;
  if let Some(white) = offsets.white {
    let mut w = 0;
    if r == g && g == b {
      w = r;
      r = 0;
      g = 0;
      b = 0;
    }
    put_channel(out, white, w, blend);
  } else if let Some(alpha) = offsets.alpha {
    out[usize::from(alpha)] = 0xFF;
  }
  put_channel(out, offsets.red, r, blend);
  put_channel(out, offsets.green, g, blend);
  put_channel(out, offsets.blue, b, blend);
}

#[inline]
fn put_channel(out: &mut [u8], offset: u8, value: u8, blend: Option<f32>) {
  let slot = &mut out[usize::from(offset)];
  *slot = match blend {
    Some(f) => (f32::from(value) * f + f32::from(*slot) * (1.0 - f)) as u8,
    None => value,
  };
}
