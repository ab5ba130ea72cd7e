#![forbid(unsafe_code)]

//! The sprite type: a loaded bitmap plus the window being shown.

use alloc::vec::Vec;

use embedded_io::{Read, Seek};
use log::{debug, trace, warn};
use pixel_formats::r8g8b8_Srgb;

use crate::{
  bmp::{bmp_iter_bgr, bmp_iter_pal_indexes, bmp_read_header, BmpHeader},
  fill::{plan_fill, window_positions, FillPlan, WindowFill},
  parser_helpers::*,
  strategy::{DecoderVisitor, PixelDecoder},
  ChannelLayout, DecodeStrategy, FillOptions, FormatError, RangeError, RenderError,
  SliceSource, ViewWindow,
};

/// Something that can physically display a filled output buffer, such as an
/// LED strip driver.
pub trait PixelSink {
  type Error;

  /// Sends the buffer out to the hardware.
  fn show(&mut self, buffer: &[u8]) -> Result<(), Self::Error>;
}

/// A bitmap loaded into memory, ready to be rendered into LED buffers.
///
/// The pixel data is kept exactly as it was stored in the file (including row
/// padding and bottom-up row order), and decoded on the fly each time a
/// buffer is filled. Only the [`window`](Sprite::window) changes between
/// frames.
///
/// Dropping a sprite frees all of its storage. On small devices drop the old
/// sprite *before* opening the next one, so that two sprites' pixel data is
/// never held at once.
#[derive(Debug, Clone)]
pub struct Sprite {
  header: BmpHeader,
  strategy: DecodeStrategy,
  /// Empty for direct color images.
  palette: Vec<r8g8b8_Srgb>,
  pixels: Vec<u8>,
  window: ViewWindow,
}
impl Sprite {
  /// Reads a sprite out of a seekable byte source.
  ///
  /// Everything needed is copied into the sprite, the source isn't used
  /// after this returns. The window starts out covering the whole bitmap.
  ///
  /// ## Failure
  /// * Any of the header checks listed on
  ///   [`bmp_read_header`](crate::bmp::bmp_read_header).
  /// * The source ends before the palette or pixel data is complete.
  /// * The source returns an error.
  /// * Allocation failure.
  pub fn open<S: Read + Seek>(source: &mut S) -> Result<Self, FormatError> {
    let header = bmp_read_header(source)?;
    let strategy = DecodeStrategy::for_bit_depth(header.bits_per_pixel)
      .ok_or(FormatError::UnsupportedBitDepth(header.bits_per_pixel))?;
    trace!("decode strategy: {strategy:?}");

    let mut palette: Vec<r8g8b8_Srgb> = Vec::new();
    if header.is_indexed() {
      seek_to(source, header.palette_offset())?;
      palette.try_reserve_exact(header.palette_len)?;
      for _ in 0..header.palette_len {
        let [b, g, r, _reserved] = read_pod::<[u8; 4], S>(source)?;
        palette.push(r8g8b8_Srgb { r, g, b });
      }
    }

    let pixel_data_len = header.pixel_data_len();
    let available = source_len(source)?.saturating_sub(u64::from(header.pixel_data_offset));
    if (pixel_data_len as u64) > available {
      return Err(FormatError::TruncatedData);
    }
    let mut pixels: Vec<u8> = Vec::new();
    pixels.try_reserve_exact(pixel_data_len)?;
    pixels.resize(pixel_data_len, 0);
    seek_to(source, u64::from(header.pixel_data_offset))?;
    read_into(source, &mut pixels)?;

    debug!(
      "loaded {}x{} sprite, {}bpp, {:?}, {} palette entries, {} pixel bytes",
      header.width,
      header.height,
      header.bits_per_pixel,
      strategy,
      palette.len(),
      pixels.len()
    );
    let window = ViewWindow::new(0, 0, header.width, header.height);
    Ok(Self { header, strategy, palette, pixels, window })
  }

  /// Reads a sprite out of the bytes of a BMP file.
  #[inline]
  pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
    Self::open(&mut SliceSource::new(bytes))
  }

  /// The parsed header.
  #[inline]
  #[must_use]
  pub const fn header(&self) -> &BmpHeader {
    &self.header
  }

  /// Bitmap width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.header.width
  }

  /// Bitmap height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.header.height
  }

  /// If the rows are stored top row first.
  #[inline]
  #[must_use]
  pub const fn top_to_bottom(&self) -> bool {
    self.header.top_to_bottom
  }

  #[inline]
  #[must_use]
  pub const fn strategy(&self) -> DecodeStrategy {
    self.strategy
  }

  /// The color table, for indexed images.
  #[inline]
  #[must_use]
  pub fn palette(&self) -> Option<&[r8g8b8_Srgb]> {
    if self.strategy.uses_palette() {
      Some(&self.palette)
    } else {
      None
    }
  }

  /// The raw pixel array, exactly as stored in the file.
  #[inline]
  #[must_use]
  pub fn pixel_data(&self) -> &[u8] {
    &self.pixels
  }

  #[inline]
  #[must_use]
  pub const fn window(&self) -> ViewWindow {
    self.window
  }

  /// Sets the window's position and size.
  ///
  /// This isn't checked against the bitmap, a bad window is reported when
  /// the next fill is attempted.
  #[inline]
  pub fn set_window(&mut self, x: u32, y: u32, width: u32, height: u32) {
    self.window = ViewWindow::new(x, y, width, height);
  }

  /// Moves the window without changing its size.
  #[inline]
  pub fn set_offset(&mut self, x: u32, y: u32) {
    self.window.x = x;
    self.window.y = y;
  }

  /// Resizes the window without moving it.
  #[inline]
  pub fn set_size(&mut self, width: u32, height: u32) {
    self.window.width = width;
    self.window.height = height;
  }

  /// Gets the color at `(x, y)`, with `(0, 0)` as the top left.
  ///
  /// `None` if the position is out of bounds.
  #[inline]
  #[must_use]
  pub fn pixel(&self, x: u32, y: u32) -> Option<r8g8b8_Srgb> {
    if x >= self.header.width || y >= self.header.height {
      return None;
    }
    let row = self.storage_row(y);
    Some(self.strategy.dispatch(
      &self.pixels,
      self.header.row_stride(),
      &self.palette,
      DecodeAt { row, col: x as usize },
    ))
  }

  /// Runs the `(x, y, color)` op for every pixel of the bitmap.
  ///
  /// Pixels proceed left to right across each row, and rows go top to bottom
  /// regardless of how the file stores them. The window is ignored.
  pub fn for_each_pixel<F: FnMut(u32, u32, r8g8b8_Srgb)>(&self, mut op: F) {
    let BmpHeader { width, height, bits_per_pixel, .. } = self.header;
    let row_stride = self.header.row_stride();
    for y in 0..height {
      let start = self.storage_row(y) * row_stride;
      let row = &self.pixels[start..start + row_stride];
      if self.strategy.uses_palette() {
        for (x, i) in (0..).zip(bmp_iter_pal_indexes(row, width, bits_per_pixel)) {
          op(x, y, self.palette.get(usize::from(i)).copied().unwrap_or_default());
        }
      } else {
        for (x, color) in (0..).zip(bmp_iter_bgr(row, width, bits_per_pixel)) {
          op(x, y, color);
        }
      }
    }
  }

  /// Fills an output buffer with the window's pixels in an LED strip's byte
  /// layout.
  ///
  /// Window pixels are visited row by row from the top of the window, left
  /// to right. See [`FillOptions`] for partial fills, wraparound, and
  /// blending, and the [`fill`](crate::fill) module for how the write cursor
  /// moves.
  ///
  /// Returns the number of output pixels written.
  ///
  /// ## Failure
  /// Everything is checked before any byte is written.
  /// * The window must be non-empty and inside the bitmap.
  /// * The buffer must fit at least one output pixel.
  /// * Every pixel of the range must fit in the buffer, and the write cursor
  ///   must be able to land on the last pixel of the range.
  pub fn fill_buffer(
    &self, buffer: &mut [u8], layout: ChannelLayout, options: &FillOptions,
  ) -> Result<usize, RangeError> {
    let plan = self.check_fill(buffer.len(), layout, options).map_err(|e| {
      warn!("fill rejected: {e} (window {:?}, buffer {} bytes)", self.window, buffer.len());
      e
    })?;
    let positions = window_positions(self.window, self.header.height, self.header.top_to_bottom);
    let written = self.strategy.dispatch(
      &self.pixels,
      self.header.row_stride(),
      &self.palette,
      WindowFill { buffer, layout, plan, blend: options.blend, positions },
    );
    Ok(written)
  }

  /// Fills the buffer and then shows it on the sink.
  pub fn render<K: PixelSink>(
    &self, sink: &mut K, buffer: &mut [u8], layout: ChannelLayout, options: &FillOptions,
  ) -> Result<usize, RenderError<K::Error>> {
    let written = self.fill_buffer(buffer, layout, options)?;
    sink.show(buffer).map_err(RenderError::Sink)?;
    Ok(written)
  }

  /// Applies a color function to every stored color, in place.
  ///
  /// * Indexed images: the function runs once per palette entry, and the
  ///   pixel indexes are left alone.
  /// * Direct color images: the function runs once per pixel of the whole
  ///   bitmap. Row padding, and the unused fourth byte of 32bpp pixels, are
  ///   left alone.
  ///
  /// The window doesn't matter. Colors are visited in storage order, so the
  /// function should treat each color on its own.
  pub fn transform<F: FnMut(r8g8b8_Srgb) -> r8g8b8_Srgb>(&mut self, mut f: F) {
    if self.strategy.uses_palette() {
      self.palette.iter_mut().for_each(|c| *c = f(*c));
      return;
    }
    let bytes_per_column = usize::from(self.header.bits_per_pixel / 8);
    let used_per_row = self.header.width as usize * bytes_per_column;
    let row_stride = self.header.row_stride();
    for row in self.pixels.chunks_exact_mut(row_stride) {
      for px in row[..used_per_row].chunks_exact_mut(bytes_per_column) {
        let r8g8b8_Srgb { r, g, b } = f(r8g8b8_Srgb { r: px[2], g: px[1], b: px[0] });
        px[0] = b;
        px[1] = g;
        px[2] = r;
      }
    }
  }

  /// The storage row holding the image row `y` (counted from the top).
  #[inline]
  fn storage_row(&self, y: u32) -> usize {
    if self.header.top_to_bottom {
      y as usize
    } else {
      (self.header.height - 1 - y) as usize
    }
  }

  fn check_fill(
    &self, buffer_len: usize, layout: ChannelLayout, options: &FillOptions,
  ) -> Result<FillPlan, RangeError> {
    if self.window.width == 0 || self.window.height == 0 {
      return Err(RangeError::EmptyWindow);
    }
    if !self.window.fits_within(self.header.width, self.header.height) {
      return Err(RangeError::WindowOutOfBounds);
    }
    plan_fill(buffer_len, layout.bytes_per_pixel(), options)
  }
}

struct DecodeAt {
  row: usize,
  col: usize,
}
impl DecoderVisitor for DecodeAt {
  type Output = r8g8b8_Srgb;
  #[inline]
  fn visit<D: PixelDecoder>(self, decoder: D) -> r8g8b8_Srgb {
    decoder.decode(self.row, self.col)
  }
}
