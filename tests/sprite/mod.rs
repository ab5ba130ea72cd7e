use neosprite::{
  color::{brightness, combo_table, with_table, Gamma},
  ChannelLayout, DecodeStrategy, FillOptions, FormatError, Sprite,
};

use super::*;

const RED: r8g8b8_Srgb = rgb(255, 0, 0);
const GREEN: r8g8b8_Srgb = rgb(0, 255, 0);
const BLUE: r8g8b8_Srgb = rgb(0, 0, 255);
const WHITE: r8g8b8_Srgb = rgb(255, 255, 255);

fn all_pixels(sprite: &Sprite) -> Vec<(u32, u32, r8g8b8_Srgb)> {
  let mut v = Vec::new();
  sprite.for_each_pixel(|x, y, c| v.push((x, y, c)));
  v
}

#[test]
fn test_24bpp_loads_top_row_first() {
  let bytes = bmp_24(&[&[RED, GREEN], &[BLUE, WHITE]]);
  let sprite = Sprite::from_bytes(&bytes).unwrap();
  assert_eq!(sprite.width(), 2);
  assert_eq!(sprite.height(), 2);
  assert!(!sprite.top_to_bottom());
  assert_eq!(sprite.strategy(), DecodeStrategy::Direct24);
  assert_eq!(sprite.palette(), None);
  assert_eq!(sprite.pixel_data().len(), 16);
  assert_eq!(all_pixels(&sprite), [(0, 0, RED), (1, 0, GREEN), (0, 1, BLUE), (1, 1, WHITE)]);
  assert_eq!(sprite.pixel(0, 1), Some(BLUE));
  assert_eq!(sprite.pixel(2, 0), None);
  assert_eq!(sprite.pixel(0, 2), None);
  assert_eq!(sprite.window(), neosprite::ViewWindow::new(0, 0, 2, 2));

  let mut buffer = [0; 12];
  let written =
    sprite.fill_buffer(&mut buffer, ChannelLayout::NeoPixelRgb, &FillOptions::new()).unwrap();
  assert_eq!(written, 4);
  assert_eq!(buffer, [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]);
}

#[test]
fn test_negative_height_flips_row_order() {
  let up = Sprite::from_bytes(&bmp_24(&[&[RED, GREEN], &[BLUE, WHITE]])).unwrap();
  // same rows, stored top row first.
  let mut data = Vec::new();
  for c in [RED, GREEN] {
    data.extend_from_slice(&[c.b, c.g, c.r]);
  }
  data.extend_from_slice(&[0, 0]);
  for c in [BLUE, WHITE] {
    data.extend_from_slice(&[c.b, c.g, c.r]);
  }
  data.extend_from_slice(&[0, 0]);
  let down = Sprite::from_bytes(&bmp_bytes(2, -2, 24, &[], &data)).unwrap();
  assert!(down.top_to_bottom());
  assert_eq!(down.height(), 2);
  assert_eq!(all_pixels(&up), all_pixels(&down));

  for sprite in [&up, &down] {
    let mut sprite = sprite.clone();
    sprite.set_window(0, 1, 2, 1);
    let mut buffer = [0; 6];
    sprite.fill_buffer(&mut buffer, ChannelLayout::NeoPixelRgb, &FillOptions::new()).unwrap();
    assert_eq!(buffer, [0, 0, 255, 255, 255, 255]);
  }
}

/// Random pixels at every bit depth, checking that random access decoding
/// (used by fills) agrees with the sequential row decoding.
#[test]
fn test_every_strategy_matches_sequential_decode() {
  let (width, height) = (7_u32, 5_u32);
  for bpp in [1_u16, 4, 8, 24, 32] {
    let palette: Vec<r8g8b8_Srgb> = if bpp <= 8 {
      rand_bytes(3 << bpp).chunks_exact(3).map(|c| rgb(c[0], c[1], c[2])).collect()
    } else {
      Vec::new()
    };
    let data = rand_bytes(row_stride(width, bpp) * height as usize);
    let bytes = bmp_bytes(width as i32, height as i32, bpp, &palette, &data);
    let mut sprite = Sprite::from_bytes(&bytes).unwrap();
    assert_eq!(sprite.strategy().bits_per_pixel(), bpp);
    assert_eq!(sprite.palette().map(<[_]>::len), if bpp <= 8 { Some(1 << bpp) } else { None });

    let sequential = all_pixels(&sprite);
    assert_eq!(sequential.len(), (width * height) as usize);
    for &(x, y, c) in &sequential {
      assert_eq!(sprite.pixel(x, y), Some(c), "bpp {bpp} at ({x},{y})");
    }

    assert_eq!(sprite.header().is_indexed(), bpp <= 8);
    assert_eq!(sprite.window().pixel_count(), sequential.len());
    let mut buffer = vec![0; sequential.len() * 3];
    let written =
      sprite.fill_buffer(&mut buffer, ChannelLayout::NeoPixelRgb, &FillOptions::new()).unwrap();
    assert_eq!(written, sprite.window().pixel_count());
    let filled: Vec<r8g8b8_Srgb> =
      buffer.chunks_exact(3).map(|c| rgb(c[0], c[1], c[2])).collect();
    let expected: Vec<r8g8b8_Srgb> = sequential.iter().map(|p| p.2).collect();
    assert_eq!(filled, expected, "bpp {bpp}");

    // a one pixel window anywhere picks out that pixel.
    sprite.set_size(1, 1);
    for &(x, y, c) in sequential.iter().step_by(3) {
      sprite.set_offset(x, y);
      let mut one = [0; 3];
      sprite.fill_buffer(&mut one, ChannelLayout::NeoPixelRgb, &FillOptions::new()).unwrap();
      assert_eq!(one, [c.r, c.g, c.b], "bpp {bpp} at ({x},{y})");
    }
  }
}

#[test]
fn test_short_palette_out_of_range_index_is_black() {
  let palette = [RED, GREEN];
  let data = [0, 1, 5, 0];
  let sprite = Sprite::from_bytes(&bmp_bytes(3, 1, 8, &palette, &data)).unwrap();
  assert_eq!(sprite.palette(), Some(&palette[..]));
  let colors: Vec<_> = all_pixels(&sprite).into_iter().map(|p| p.2).collect();
  assert_eq!(colors, [RED, GREEN, rgb(0, 0, 0)]);
  assert_eq!(sprite.pixel(2, 0), Some(rgb(0, 0, 0)));
}

#[test]
fn test_transform_indexed_changes_palette_only() {
  let palette = [RED, rgb(100, 50, 200)];
  let data = [0, 1, 1, 0];
  let mut sprite = Sprite::from_bytes(&bmp_bytes(4, 1, 8, &palette, &data)).unwrap();
  let before = all_pixels(&sprite);

  sprite.transform(|c| c);
  assert_eq!(all_pixels(&sprite), before);
  assert_eq!(sprite.palette(), Some(&palette[..]));

  let mut calls = 0;
  sprite.transform(|_| {
    calls += 1;
    rgb(0, 0, 0)
  });
  assert_eq!(calls, 2);
  assert_eq!(sprite.pixel_data(), &data);
  assert!(all_pixels(&sprite).iter().all(|p| p.2 == rgb(0, 0, 0)));
}

#[test]
fn test_transform_direct_skips_padding_and_fourth_byte() {
  // 24bpp, one pixel per row, one padding byte per row.
  let data = [10, 20, 30, 0x77, 40, 50, 60, 0x77];
  let mut sprite = Sprite::from_bytes(&bmp_bytes(1, 2, 24, &[], &data)).unwrap();
  let mut calls = 0;
  sprite.transform(|_| {
    calls += 1;
    rgb(1, 2, 3)
  });
  assert_eq!(calls, 2);
  assert_eq!(sprite.pixel_data(), &[3, 2, 1, 0x77, 3, 2, 1, 0x77]);

  let data = [10, 20, 30, 0xAB, 40, 50, 60, 0xCD];
  let mut sprite = Sprite::from_bytes(&bmp_bytes(2, 1, 32, &[], &data)).unwrap();
  sprite.transform(brightness(0.5));
  assert_eq!(sprite.pixel_data(), &[5, 10, 15, 0xAB, 20, 25, 30, 0xCD]);
}

#[test]
fn test_transform_with_gamma_table() {
  let mut sprite = Sprite::from_bytes(&bmp_24(&[&[WHITE, rgb(128, 0, 255)]])).unwrap();
  const TABLE: [u8; 256] = combo_table(Gamma::Gamma2_2, 255);
  sprite.transform(with_table(&TABLE));
  assert_eq!(sprite.pixel(0, 0), Some(WHITE));
  assert_eq!(sprite.pixel(1, 0), Some(rgb(56, 0, 255)));
}

#[test]
fn test_open_from_a_seekable_source() {
  let bytes = bmp_24(&[&[RED, GREEN, BLUE]]);
  let mut source = neosprite::SliceSource::new(&bytes);
  let sprite = Sprite::open(&mut source).unwrap();
  assert_eq!(sprite.pixel(2, 0), Some(BLUE));
}

#[test]
fn test_format_errors() {
  let good = bmp_24(&[&[RED, GREEN]]);
  assert!(Sprite::from_bytes(&good).is_ok());

  assert_eq!(Sprite::from_bytes(&[]).unwrap_err(), FormatError::TruncatedData);

  let mut bad = good.clone();
  bad[0] = b'X';
  assert_eq!(Sprite::from_bytes(&bad).unwrap_err(), FormatError::NotABitmap);

  let mut bad = good.clone();
  bad[14..18].copy_from_slice(&12_u32.to_le_bytes());
  assert_eq!(Sprite::from_bytes(&bad).unwrap_err(), FormatError::UnsupportedHeader(12));

  let mut bad = good.clone();
  bad[30..34].copy_from_slice(&1_u32.to_le_bytes());
  assert_eq!(Sprite::from_bytes(&bad).unwrap_err(), FormatError::UnsupportedCompression(1));

  let mut bad = good.clone();
  bad[28..30].copy_from_slice(&16_u16.to_le_bytes());
  assert_eq!(Sprite::from_bytes(&bad).unwrap_err(), FormatError::UnsupportedBitDepth(16));

  let mut bad = good.clone();
  bad[18..22].copy_from_slice(&0_i32.to_le_bytes());
  assert_eq!(Sprite::from_bytes(&bad).unwrap_err(), FormatError::InvalidDimensions);

  let mut bad = good.clone();
  bad[22..26].copy_from_slice(&0_i32.to_le_bytes());
  assert_eq!(Sprite::from_bytes(&bad).unwrap_err(), FormatError::InvalidDimensions);

  let truncated = &good[..good.len() - 1];
  assert_eq!(Sprite::from_bytes(truncated).unwrap_err(), FormatError::TruncatedData);

  // a huge declared size fails without trying to allocate it.
  let mut bad = good.clone();
  bad[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
  assert_eq!(Sprite::from_bytes(&bad).unwrap_err(), FormatError::TruncatedData);

  let palette = [RED, GREEN, BLUE];
  let bad = bmp_bytes(8, 1, 1, &palette, &[0; 4]);
  assert_eq!(Sprite::from_bytes(&bad).unwrap_err(), FormatError::PaletteTooLarge(3));

  // palette runs off the end of the file.
  let palette = [RED, GREEN];
  let bad = bmp_bytes(8, 1, 1, &palette, &[]);
  assert_eq!(Sprite::from_bytes(&bad[..60]).unwrap_err(), FormatError::TruncatedData);
}

#[test]
fn test_hostile_bytes_do_not_panic() {
  for _ in 0..200 {
    let mut bytes = rand_bytes(256);
    bytes[0..2].copy_from_slice(b"BM");
    bytes[14..18].copy_from_slice(&40_u32.to_le_bytes());
    bytes[30..34].copy_from_slice(&0_u32.to_le_bytes());
    if let Ok(sprite) = Sprite::from_bytes(&bytes) {
      sprite.for_each_pixel(|_, _, _| ());
      let mut buffer = [0; 30];
      sprite.fill_buffer(&mut buffer, ChannelLayout::DotStarBgra, &FillOptions::new()).ok();
    }
  }
}
