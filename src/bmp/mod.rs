#![forbid(unsafe_code)]

//! Module for Windows Bitmap files (BMP).
//!
//! ## Parsing The Format
//!
//! Note: All multi-byte values in BMP are always little-endian encoded.
//!
//! * A bitmap file always starts with a "file header". This is always 14 bytes.
//!   * The tag `BM`.
//!   * A total size of the file (which we ignore).
//!   * The position of the pixel data within the file.
//! * Next is an "info header". There's many versions of this header, and the
//!   first 4 bytes are always the size of the full info header. Only the 40
//!   byte `BITMAPINFOHEADER` is supported here, which is what basically every
//!   paint program writes for simple images.
//! * Next there **might** be a color table. This is mandatory if the bit depth
//!   is 8 (or less) bits per pixel. The default number of entries is
//!   `2**bits_per_pixel`, though the header can specify a smaller table. Each
//!   entry is `[b, g, r, 0]`.
//! * Next there might be a gap, and then the pixel array, at the offset given
//!   in the file header. Each row of the pixel array is padded to 4 bytes.
//!   Rows are stored bottom row first unless the height is negative.
//!
//! When the bits per pixel is less than 8 the pixels will be packed within a
//! byte. In this case, the leftmost pixel is the highest bits of the byte.
//! * 1, 4, and 8 bits per pixel are indexed color.
//! * 24 and 32 bits per pixel is direct color, `[b,g,r]` within `[u8; 3]` or
//!   `[b,g,r,_]` within `[u8; 4]`.

use bitfrob::U8BitIterHigh;
use embedded_io::{Read, Seek};
use log::trace;
use pack1::U32LE;
use pixel_formats::r8g8b8_Srgb;

use crate::{parser_helpers::*, FormatError};

mod raw_headers;
pub(crate) use raw_headers::*;

mod bmp_header;
pub use bmp_header::*;

mod iters;
pub use iters::*;
