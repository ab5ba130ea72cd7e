#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! Renders BMP sprites onto addressable LED strips.
//!
//! A [`Sprite`] is loaded once from an uncompressed BMP file, then a movable
//! [`ViewWindow`] over it is written into an LED driver's output buffer as
//! often as needed, in whatever byte layout the strip's chips want. Pixel
//! data stays in its stored form and is decoded while filling, so loading is
//! cheap and the memory cost is roughly the size of the file.
//!
//! ```no_run
//! use neosprite::{ChannelLayout, FillOptions, Sprite};
//! # fn run(bmp: &[u8]) -> Result<(), neosprite::FormatError> {
//! let mut sprite = Sprite::from_bytes(bmp)?;
//! sprite.transform(neosprite::color::brightness(0.25));
//! // an 8x8 panel showing the frame in the top left of a sprite sheet.
//! sprite.set_window(0, 0, 8, 8);
//! let mut buffer = [0_u8; 8 * 8 * 3];
//! sprite.fill_buffer(&mut buffer, ChannelLayout::NeoPixelGrb, &FillOptions::new()).ok();
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//! * `std`: `std::error::Error` impls for the error types, and `embedded-io`'s
//!   std adapters so that files can be used as a source.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub use pixel_formats::r8g8b8_Srgb;

mod parser_helpers;

pub mod bmp;

pub mod color;

pub mod fill;
pub use fill::FillOptions;

mod error;
pub use error::*;

mod layout;
pub use layout::*;

mod source;
pub use source::*;

mod sprite;
pub use sprite::*;

pub mod strategy;
pub use strategy::DecodeStrategy;

mod window;
pub use window::*;
