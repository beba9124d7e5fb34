//! Conveniences built on top of [`decode_image`] and [`encode_image`]: file
//! wrappers and channel conversions.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::decode::decode_image;
use crate::encode::encode_image;
use crate::error::Error;
use crate::image::Image;
use crate::meta::ImageMeta;

/// Reads a QOI image from the file at `path`. `channels` is passed on to
/// [`decode_image`]: 0 (as stored), 3 or 4.
pub fn read_file<P: AsRef<Path>>(path: P, channels: u8) -> Result<Image, Error> {
  let file = File::open(path)?;
  decode_image(BufReader::new(file), channels, false)
}

/// Writes `image` as QOI to the file at `path`, creating or truncating it.
pub fn write_file<P: AsRef<Path>>(image: &Image, path: P) -> Result<(), Error> {
  let file = File::create(path)?;
  encode_image(image, file)
}

/// Converts a 3 channel image to 4 channels, giving every pixel `alpha`. A 4
/// channel image is returned unchanged.
pub fn add_alpha(image: Image, alpha: u8) -> Image {
  if image.channels() != 3 {
    return image;
  }

  let meta = image.meta();
  let mut pixels = Vec::with_capacity(image.pixels().len() / 3 * 4);

  for rgb in image.pixels().chunks_exact(3) {
    pixels.extend_from_slice(rgb);
    pixels.push(alpha);
  }

  Image::from_parts(ImageMeta { channels: 4, ..meta }, pixels)
}

/// Converts a 4 channel image to 3 channels by dropping alpha. A 3 channel
/// image is returned unchanged.
pub fn remove_alpha(image: Image) -> Image {
  if image.channels() != 4 {
    return image;
  }

  let meta = image.meta();
  let pixels = image
    .pixels()
    .chunks_exact(4)
    .flat_map(|rgba| &rgba[..3])
    .copied()
    .collect();

  Image::from_parts(ImageMeta { channels: 3, ..meta }, pixels)
}
