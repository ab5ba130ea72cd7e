//! Ready-made color transforms for [`Sprite::transform`](crate::Sprite::transform).
//!
//! LEDs are very bright and very non-linear, so sprites usually get dimmed
//! and gamma corrected once, right after loading. Each helper here returns a
//! pointwise function, and the transform applies it once per stored color.
//!
//! ```
//! use neosprite::color::{combo_table, with_table, Gamma};
//! # fn run(sprite: &mut neosprite::Sprite) {
//! const TABLE: [u8; 256] = combo_table(Gamma::Gamma2_2, 64);
//! sprite.transform(with_table(&TABLE));
//! # }
//! ```

use pixel_formats::r8g8b8_Srgb;

/// Scales every channel by `level`, which is clamped to `0.0 ..= 1.0`.
///
/// Results are truncated toward zero.
#[inline]
pub fn brightness(level: f32) -> impl FnMut(r8g8b8_Srgb) -> r8g8b8_Srgb {
  let level = level.clamp(0.0, 1.0);
  move |r8g8b8_Srgb { r, g, b }| r8g8b8_Srgb {
    r: (f32::from(r) * level) as u8,
    g: (f32::from(g) * level) as u8,
    b: (f32::from(b) * level) as u8,
  }
}

/// Gamma correction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gamma {
  /// No correction.
  Linear,
  /// Standard gamma 2.2 correction for perceived brightness.
  #[default]
  Gamma2_2,
}

/// Gamma 2.2 lookup table: `(value/255)^2.2 * 255`, rounded.
#[rustfmt::skip]
const GAMMA_2_2_TABLE: [u8; 256] = [
  0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
  3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
  11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
  23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
  40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
  62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
  89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
  117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
  146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
  179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
  215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
  255,
];

/// Builds a table that applies gamma and then scales to `max_brightness`.
///
/// `table[v]` is the final output for an input channel value `v`. Being a
/// `const fn`, the table can be baked in at compile time.
#[must_use]
pub const fn combo_table(gamma: Gamma, max_brightness: u8) -> [u8; 256] {
  let mut table = [0_u8; 256];
  let mut i = 0;
  while i < 256 {
    let corrected = match gamma {
      Gamma::Linear => i as u8,
      Gamma::Gamma2_2 => GAMMA_2_2_TABLE[i],
    };
    table[i] = ((corrected as u16 * max_brightness as u16) / 255) as u8;
    i += 1;
  }
  table
}

/// Looks up every channel in a table, such as one from [`combo_table`].
#[inline]
pub fn with_table(table: &[u8; 256]) -> impl FnMut(r8g8b8_Srgb) -> r8g8b8_Srgb + '_ {
  move |r8g8b8_Srgb { r, g, b }| r8g8b8_Srgb {
    r: table[usize::from(r)],
    g: table[usize::from(g)],
    b: table[usize::from(b)],
  }
}
