use crate::error::Error;
use crate::meta::{Colorspace, ImageMeta};

/// A decoded image: dimensions, channel count, colorspace tag and the raw
/// pixel data it owns.
///
/// Pixels are stored interleaved as `[R, G, B]` or `[R, G, B, A]`, row-major,
/// with no padding between rows. An `Image` can only be built through
/// [`Image::new`], which validates it, and is never mutated afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Image {
  meta: ImageMeta,
  pixels: Vec<u8>,
}

impl Image {
  /// Creates an image from raw pixel data. The buffer is taken as is, not
  /// copied.
  ///
  /// Fails if `width` or `height` is zero, if `channels` is not 3 or 4, or if
  /// `pixels.len()` is not `width * height * channels`.
  pub fn new(
    width: u32,
    height: u32,
    channels: u8,
    colorspace: Colorspace,
    pixels: Vec<u8>,
  ) -> Result<Self, Error> {
    if width == 0 || height == 0 {
      return Err(Error::InvalidDimensions { width, height });
    }

    if channels != 3 && channels != 4 {
      return Err(Error::InvalidChannels(channels));
    }

    let meta = ImageMeta { width, height, channels, colorspace };
    let expected = meta.buffer_len(channels).ok_or(Error::InvalidDimensions { width, height })?;

    if pixels.len() != expected {
      return Err(Error::InvalidDataLength { expected, actual: pixels.len() });
    }

    Ok(Self { meta, pixels })
  }

  // Used by the decoder, which has already validated everything `new` would.
  pub(crate) fn from_parts(meta: ImageMeta, pixels: Vec<u8>) -> Self {
    debug_assert_eq!(meta.buffer_len(meta.channels), Some(pixels.len()));
    Self { meta, pixels }
  }

  pub fn width(&self) -> u32 {
    self.meta.width
  }

  pub fn height(&self) -> u32 {
    self.meta.height
  }

  /// Either 3 (RGB) or 4 (RGBA).
  pub fn channels(&self) -> u8 {
    self.meta.channels
  }

  pub fn colorspace(&self) -> Colorspace {
    self.meta.colorspace
  }

  /// The header-shaped metadata of this image.
  pub fn meta(&self) -> ImageMeta {
    self.meta
  }

  /// The raw pixel data, `width * height * channels` bytes long.
  pub fn pixels(&self) -> &[u8] {
    &self.pixels
  }

  /// Consumes the image, returning its pixel buffer.
  pub fn into_pixels(self) -> Vec<u8> {
    self.pixels
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_creating_image() {
    let image = Image::new(2, 1, 4, Colorspace::Linear, vec![1, 2, 3, 4, 5, 6, 7, 8])
      .expect("Failed to create image");

    assert_eq!(image.width(), 2);
    assert_eq!(image.height(), 1);
    assert_eq!(image.channels(), 4);
    assert_eq!(image.colorspace(), Colorspace::Linear);
    assert_eq!(image.pixels(), &[1, 2, 3, 4, 5, 6, 7, 8]);
  }

  #[test]
  fn test_creating_image_with_zero_dimensions() {
    assert_eq!(
      Image::new(0, 1, 3, Colorspace::Srgb, vec![]),
      Err(Error::InvalidDimensions { width: 0, height: 1 })
    );
    assert_eq!(
      Image::new(1, 0, 3, Colorspace::Srgb, vec![]),
      Err(Error::InvalidDimensions { width: 1, height: 0 })
    );
  }

  #[test]
  fn test_creating_image_with_bad_channels() {
    assert_eq!(
      Image::new(1, 1, 2, Colorspace::Srgb, vec![0, 0]),
      Err(Error::InvalidChannels(2))
    );
  }

  #[test]
  fn test_creating_image_with_bad_length() {
    assert_eq!(
      Image::new(2, 2, 3, Colorspace::Srgb, vec![0; 11]),
      Err(Error::InvalidDataLength { expected: 12, actual: 11 })
    );
  }
}
