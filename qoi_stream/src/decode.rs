use std::io;

use log::{debug, trace};

use crate::cache::ColorCache;
use crate::error::Error;
use crate::image::Image;
use crate::meta::{ImageMeta, QOI_BYTES_END};
use crate::op::Op;
use crate::pixel::{Pixel, PixelDiff};
use crate::stream::Input;

// Upper bound on the pixel buffer reserved before decoding starts. Header
// dimensions are untrusted, so larger images grow the buffer as they go.
const MAX_INITIAL_RESERVE: usize = 1 << 24;

/// Decodes a single QOI image from `reader`.
///
/// `channels` selects the channel count of the returned image: `3` or `4`
/// convert to that count (dropping alpha, or filling it with 255), and `0`
/// keeps the count stored in the header.
///
/// When `strict` is `false` the source is read in large chunks, so bytes that
/// follow the image in `reader` may be consumed too; for best performance the
/// reader should then not be buffered. When `strict` is `true` the reader is
/// left positioned exactly after the image's end marker, which allows reading
/// QOI data embedded in a larger stream. Every byte is then read with its own
/// call, so a buffered reader such as `std::io::BufReader` should be passed.
pub fn decode_image<R: io::Read>(reader: R, channels: u8, strict: bool) -> Result<Image, Error> {
  if !matches!(channels, 0 | 3 | 4) {
    return Err(Error::InvalidChannels(channels));
  }

  let mut input = Input::new(reader, strict);
  let stored = decode_header(&mut input)?;
  let channels = if channels == 0 { stored.channels } else { channels };

  debug!(
    "decoding {}x{} image, {} stored channels as {}, {:?}, strict: {}",
    stored.width, stored.height, stored.channels, channels, stored.colorspace, strict
  );

  let meta = ImageMeta { channels, ..stored };
  let len = meta.buffer_len(channels).ok_or(Error::ImageTooLarge {
    width: meta.width,
    height: meta.height,
  })?;

  let pixels = match channels {
    3 => decode_pixels::<R, 3>(&mut input, len)?,
    _ => decode_pixels::<R, 4>(&mut input, len)?,
  };

  decode_trailer(&mut input)?;
  trace!("end marker verified after {} pixel bytes", pixels.len());

  Ok(Image::from_parts(meta, pixels))
}

// Reads and validates the image's header.
fn decode_header<R: io::Read>(input: &mut Input<R>) -> Result<ImageMeta, Error> {
  ImageMeta::from_bytes(&input.read_array()?)
}

// Runs the chunk loop until `len` bytes of `N` channel pixels are produced.
fn decode_pixels<R: io::Read, const N: usize>(
  input: &mut Input<R>,
  len: usize,
) -> Result<Vec<u8>, Error> {
  let mut pixels = Vec::with_capacity(len.min(MAX_INITIAL_RESERVE));
  let mut cache = ColorCache::new();
  let mut prev = Pixel::default();

  while pixels.len() < len {
    let pixel = match Op::read_from(input)? {
      Op::Index(index) => cache.get(index),
      Op::Diff(diff_r, diff_g, diff_b) => {
        Pixel::from_diff(PixelDiff::Small(diff_r, diff_g, diff_b), &prev)
      }
      Op::Luma(luma_g, luma_rg, luma_bg) => {
        Pixel::from_diff(PixelDiff::Luma(luma_g, luma_rg, luma_bg), &prev)
      }
      Op::Rgb(r, g, b) => Pixel { r, g, b, a: prev.a },
      Op::Rgba(r, g, b, a) => Pixel::new(r, g, b, a),
      Op::Run(run_length) => {
        if pixels.len() + run_length as usize * N > len {
          return Err(Error::RunOverflow);
        }

        // All but the last repetition; the last goes through the common path.
        for _ in 1..run_length {
          prev.write::<N>(&mut pixels);
          cache.insert(prev);
        }

        prev
      }
    };

    pixel.write::<N>(&mut pixels);
    cache.insert(pixel);
    prev = pixel;
  }

  Ok(pixels)
}

// Reads the 8 byte end marker without pulling another buffered chunk.
fn decode_trailer<R: io::Read>(input: &mut Input<R>) -> Result<(), Error> {
  for expected in QOI_BYTES_END {
    if input.read_u8_no_refill()? != expected {
      return Err(Error::InvalidTrailer);
    }
  }

  Ok(())
}
