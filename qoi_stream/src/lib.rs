//! This crate implements an encoder and decoder for the
//! [QOI image format](https://qoiformat.org).
//!
//! The two primary exports are the [`decode_image`] and [`encode_image`]
//! functions. Both work on IO streams or in-memory structures by accepting a
//! generic trait bound of `std::io::Read` for the encoded image source, and
//! `std::io::Write` for the encoded image destination. Decoded images are
//! returned as an [`Image`], which owns its raw pixel data.
//!
//! Both functions buffer internally, so unbuffered readers and writers such
//! as `std::fs::File` can be passed directly. The one exception is strict
//! decoding (see [`decode_image`]), which reads byte by byte so it never
//! consumes data following the image; pass a `std::io::BufReader` there.
//!
//! # In-memory encode example
//!
//! ```rust
//! use qoi_stream::{encode_image, Colorspace, Image};
//!
//! // A 1x1 image made up of an opaque black pixel.
//! let image = Image::new(1, 1, 4, Colorspace::Srgb, vec![0, 0, 0, 255])?;
//!
//! // Buffer to write the encoded image to.
//! let mut image_destination = Vec::new();
//! encode_image(&image, &mut image_destination)?;
//!
//! // Header, a single run chunk and the end marker.
//! assert_eq!(image_destination.len(), 14 + 1 + 8);
//! # Ok::<(), qoi_stream::Error>(())
//! ```
//!
//! # Embedded stream decode example
//!
//! ```rust
//! use std::io::{BufReader, Read};
//! use qoi_stream::{decode_image, encode_to_vec, Colorspace, Image};
//!
//! let image = Image::new(2, 1, 3, Colorspace::Linear, vec![1, 2, 3, 4, 5, 6])?;
//!
//! // A QOI image followed by unrelated data.
//! let mut source = encode_to_vec(&image)?;
//! source.extend_from_slice(b"tail");
//!
//! // Strict decoding leaves the reader right after the image.
//! let mut reader = BufReader::new(source.as_slice());
//! let decoded = decode_image(&mut reader, 0, true)?;
//! assert_eq!(decoded, image);
//!
//! let mut tail = Vec::new();
//! reader.read_to_end(&mut tail)?;
//! assert_eq!(tail, b"tail");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use crate::decode::decode_image;
pub use crate::encode::{encode_image, encode_to_vec};
pub use crate::error::{Error, ErrorKind};
pub use crate::image::Image;
pub use crate::meta::{
  Colorspace, ImageMeta, QOI_BYTES_END, QOI_BYTES_MAGIC, QOI_HEADER_LEN, QOI_MAX_RUN,
};

mod cache;
mod decode;
mod encode;
mod error;
mod image;
mod meta;
mod op;
mod pixel;
mod stream;
pub mod util;
