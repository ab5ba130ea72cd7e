//! Output byte layouts for the common LED strip chips.

use core::str::FromStr;

/// Where each color channel goes within one output pixel.
///
/// Offsets are byte positions relative to the start of the pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelOffsets {
  pub red: u8,
  pub green: u8,
  pub blue: u8,
  /// Set for RGBW strips. Gray colors are moved into this channel.
  pub white: Option<u8>,
  /// Set for DotStar strips. This byte is always written as `0xFF`.
  pub alpha: Option<u8>,
}

/// The byte layout that an LED strip expects for each pixel.
///
/// * NeoPixel (WS2812 and friends) strips take 3 bytes per pixel, or 4 bytes
///   when the chip has a dedicated white LED.
/// * DotStar (APA102) strips take 4 bytes per pixel. The first byte is the
///   per-pixel global brightness header, which is always sent as `0xFF` (full
///   brightness), then the three color bytes in the chip's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelLayout {
  NeoPixelRgb,
  #[default]
  NeoPixelGrb,
  NeoPixelRgbw,
  NeoPixelGrbw,
  DotStarRgba,
  DotStarRbga,
  DotStarGrba,
  DotStarGbra,
  DotStarBrga,
  DotStarBgra,
}
impl ChannelLayout {
  /// Every layout, in declaration order.
  pub const ALL: [Self; 10] = [
    Self::NeoPixelRgb,
    Self::NeoPixelGrb,
    Self::NeoPixelRgbw,
    Self::NeoPixelGrbw,
    Self::DotStarRgba,
    Self::DotStarRbga,
    Self::DotStarGrba,
    Self::DotStarGbra,
    Self::DotStarBrga,
    Self::DotStarBgra,
  ];

  /// The byte offset of each channel.
  #[inline]
  #[must_use]
  #[rustfmt::skip]
  pub const fn offsets(self) -> ChannelOffsets {
    const fn rgb(red: u8, green: u8, blue: u8) -> ChannelOffsets {
      ChannelOffsets { red, green, blue, white: None, alpha: None }
    }
    const fn rgbw(red: u8, green: u8, blue: u8) -> ChannelOffsets {
      ChannelOffsets { red, green, blue, white: Some(3), alpha: None }
    }
    const fn dotstar(red: u8, green: u8, blue: u8) -> ChannelOffsets {
      ChannelOffsets { red, green, blue, white: None, alpha: Some(0) }
    }
    match self {
      Self::NeoPixelRgb  => rgb(0, 1, 2),
      Self::NeoPixelGrb  => rgb(1, 0, 2),
      Self::NeoPixelRgbw => rgbw(0, 1, 2),
      Self::NeoPixelGrbw => rgbw(1, 0, 2),
      Self::DotStarRgba  => dotstar(1, 2, 3),
      Self::DotStarRbga  => dotstar(1, 3, 2),
      Self::DotStarGrba  => dotstar(2, 1, 3),
      Self::DotStarGbra  => dotstar(2, 3, 1),
      Self::DotStarBrga  => dotstar(3, 1, 2),
      Self::DotStarBgra  => dotstar(3, 2, 1),
    }
  }

  /// Bytes per output pixel, 3 or 4.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(self) -> usize {
    if self.synthesizes_white() || self.synthesizes_alpha() {
      4
    } else {
      3
    }
  }

  /// If gray colors get moved into a white channel.
  #[inline]
  #[must_use]
  pub const fn synthesizes_white(self) -> bool {
    self.offsets().white.is_some()
  }

  /// If an always-opaque alpha byte is written.
  #[inline]
  #[must_use]
  pub const fn synthesizes_alpha(self) -> bool {
    self.offsets().alpha.is_some()
  }

  /// The short name of this layout, as accepted by `FromStr`.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::NeoPixelRgb => "RGB",
      Self::NeoPixelGrb => "GRB",
      Self::NeoPixelRgbw => "RGBW",
      Self::NeoPixelGrbw => "GRBW",
      Self::DotStarRgba => "DOTSTAR_RGBA",
      Self::DotStarRbga => "DOTSTAR_RBGA",
      Self::DotStarGrba => "DOTSTAR_GRBA",
      Self::DotStarGbra => "DOTSTAR_GBRA",
      Self::DotStarBrga => "DOTSTAR_BRGA",
      Self::DotStarBgra => "DOTSTAR_BGRA",
    }
  }
}

impl core::fmt::Display for ChannelLayout {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

/// The string given to [`ChannelLayout::from_str`] wasn't a layout name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnknownLayout;
impl core::fmt::Display for UnknownLayout {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str("unknown channel layout")
  }
}
#[cfg(feature = "std")]
impl std::error::Error for UnknownLayout {}

impl FromStr for ChannelLayout {
  type Err = UnknownLayout;
  /// Parses a layout name, ignoring ASCII case.
  ///
  /// NeoPixel layouts go by their channel order alone (`"GRB"`, `"rgbw"`).
  /// DotStar layouts need the `DOTSTAR_` prefix (`"DotStar_BGRA"`), or a `-`
  /// in place of the `_`.
  #[inline]
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|layout| {
        let name = layout.name();
        name.eq_ignore_ascii_case(s)
          || (name.len() == s.len()
            && name.bytes().zip(s.bytes()).all(|(n, c)| match (n, c) {
              (b'_', b'-') => true,
              (n, c) => n.eq_ignore_ascii_case(&c),
            }))
      })
      .ok_or(UnknownLayout)
  }
}
