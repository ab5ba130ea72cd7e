//! The visible region of a sprite.

/// A sub-rectangle of the bitmap, in top-left-origin pixel coordinates.
///
/// Moving the window between fills is how animation frames are played: a
/// sprite sheet holds each frame at a different offset, and no decoding
/// happens when the window moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewWindow {
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
}
impl ViewWindow {
  #[inline]
  #[must_use]
  pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
    Self { x, y, width, height }
  }

  /// Number of pixels inside the window.
  #[inline]
  #[must_use]
  pub const fn pixel_count(&self) -> usize {
    self.width as usize * self.height as usize
  }

  /// If the window lies entirely within a bitmap of the given size.
  #[inline]
  #[must_use]
  pub const fn fits_within(&self, width: u32, height: u32) -> bool {
    let right = self.x as u64 + self.width as u64;
    let bottom = self.y as u64 + self.height as u64;
    right <= width as u64 && bottom <= height as u64
  }
}

#[test]
fn test_window_fits_within() {
  assert!(ViewWindow::new(0, 0, 8, 4).fits_within(8, 4));
  assert!(ViewWindow::new(0, 28, 8, 4).fits_within(8, 32));
  assert!(!ViewWindow::new(1, 0, 8, 4).fits_within(8, 4));
  assert!(!ViewWindow::new(0, u32::MAX, 1, 1).fits_within(8, 4));
}

#[test]
fn test_window_pixel_count() {
  assert_eq!(ViewWindow::new(3, 1, 8, 4).pixel_count(), 32);
  assert_eq!(ViewWindow::new(0, 0, 0, 4).pixel_count(), 0);
}
